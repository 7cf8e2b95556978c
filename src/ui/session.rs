use chrono::Utc;
use image::ImageFormat;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::{
    error::{FluxError, Result},
    inference::ImageBackend,
    logger,
    models::GenerationResult,
    ui::{
        form::{Command, FormState},
        render,
    },
};

/// One interactive form bound to a backend. Each generation is awaited before
/// the next line of input is read.
pub struct Session<'a> {
    backend: &'a dyn ImageBackend,
    form: FormState,
    output_dir: PathBuf,
}

impl<'a> Session<'a> {
    pub fn new(backend: &'a dyn ImageBackend, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            form: FormState::new(),
            output_dir: output_dir.into(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub async fn run<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(output, "{}", render::header())?;
        writeln!(output, "{}", render::form(&self.form.request))?;
        writeln!(output, "{}", render::help())?;

        let mut buf = Vec::new();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            // Invalid UTF-8 is decoded lossily and goes through the parser like any line.
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(output, "{}", render::error(&message))?;
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Generate => self.generate(output).await?,
                Command::Help => writeln!(output, "{}", render::help())?,
                Command::ListExamples => writeln!(output, "{}", render::examples())?,
                Command::Show => writeln!(output, "{}", render::form(&self.form.request))?,
                other => {
                    self.apply(other);
                    writeln!(output, "{}", render::form(&self.form.request))?;
                }
            }
        }

        writeln!(output, "{}", render::footer())?;
        Ok(())
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::SetPrompt(prompt) => self.form.set_prompt(prompt),
            Command::SetWidth(width) => self.form.set_width(width),
            Command::SetHeight(height) => self.form.set_height(height),
            Command::SetSteps(steps) => self.form.set_steps(steps),
            Command::SetSeed(seed) => self.form.set_seed(seed),
            Command::UseExample(position) => {
                self.form.use_example(position);
            }
            _ => {}
        }
    }

    /// Failures are shown on screen; only I/O on `output` aborts the session.
    async fn generate<W: Write>(&mut self, output: &mut W) -> Result<()> {
        let request = self.form.request.clone();
        if request.prompt.trim().is_empty() {
            writeln!(output, "{}", render::error(render::EMPTY_PROMPT))?;
            return Ok(());
        }

        writeln!(output, "{}", render::BUSY)?;
        output.flush()?;

        let outcome = {
            let _timer = logger::timer("image generation");
            self.backend.generate(&request).await
        };

        let saved = outcome.and_then(|result| {
            let path = save_image(&result, &self.output_dir)?;
            Ok((result, path))
        });

        match saved {
            Ok((result, path)) => {
                writeln!(output, "{}", render::success(&request, &result, &path))?;
            }
            Err(err) => {
                log::error!("Image generation failed: {}", err);
                writeln!(output, "{}", render::error(&err.user_message()))?;
            }
        }
        Ok(())
    }
}

/// Writes the image as PNG under `dir` and returns the path.
pub fn save_image(result: &GenerationResult, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let short_id: String = result.request_id.chars().take(8).collect();
    let filename = format!("flux_{}_{}.png", Utc::now().timestamp(), short_id);
    let path = dir.join(filename);

    result
        .image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|e| FluxError::ImageError(format!("failed to save image: {}", e)))?;

    log::info!("💾 Image saved to: {}", path.display());
    Ok(path)
}
