use crate::models::{
    example_prompt, GenerationRequest, DIMENSION_STEP, EXAMPLE_PROMPTS, MAX_DIMENSION,
    MAX_STEPS, MIN_DIMENSION, MIN_STEPS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetPrompt(String),
    SetWidth(u32),
    SetHeight(u32),
    SetSteps(u32),
    SetSeed(Option<u32>),
    ListExamples,
    UseExample(usize),
    Show,
    Help,
    Generate,
    Quit,
}

impl Command {
    /// Parses one input line. The error is a message for the user.
    pub fn parse(line: &str) -> Result<Command, String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Command::Generate);
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        match name {
            "p" | "prompt" => Ok(Command::SetPrompt(rest.to_string())),
            "w" | "width" => parse_number(rest).map(Command::SetWidth),
            "h" | "height" => parse_number(rest).map(Command::SetHeight),
            "s" | "steps" => parse_number(rest).map(Command::SetSteps),
            "seed" => match rest {
                "" | "none" | "-" => Ok(Command::SetSeed(None)),
                value => parse_number(value).map(|seed| Command::SetSeed(Some(seed))),
            },
            "x" | "examples" if rest.is_empty() => Ok(Command::ListExamples),
            "x" | "examples" => {
                let position: usize = rest
                    .parse()
                    .map_err(|_| format!("⚠️ Нет такого примера: {}", rest))?;
                if example_prompt(position).is_none() {
                    return Err(format!(
                        "⚠️ Нет такого примера: {} (доступно 1–{})",
                        rest,
                        EXAMPLE_PROMPTS.len()
                    ));
                }
                Ok(Command::UseExample(position))
            }
            "f" | "form" => Ok(Command::Show),
            "?" | "help" => Ok(Command::Help),
            "g" | "go" | "generate" => Ok(Command::Generate),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("⚠️ Неизвестная команда: {} (введите ? для справки)", other)),
        }
    }
}

fn parse_number(value: &str) -> Result<u32, String> {
    value
        .parse()
        .map_err(|_| format!("⚠️ Не удалось разобрать число: '{}'", value))
}

/// Clamps into `[min, max]` and rounds to the nearest step counted from `min`.
pub fn snap(value: u32, min: u32, max: u32, step: u32) -> u32 {
    let clamped = value.clamp(min, max);
    let offset = clamped - min;
    let snapped = min + (offset + step / 2) / step * step;
    snapped.min(max)
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub request: GenerationRequest,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.request.prompt = prompt.into();
    }

    pub fn set_width(&mut self, width: u32) {
        self.request.width = snap(width, MIN_DIMENSION, MAX_DIMENSION, DIMENSION_STEP);
    }

    pub fn set_height(&mut self, height: u32) {
        self.request.height = snap(height, MIN_DIMENSION, MAX_DIMENSION, DIMENSION_STEP);
    }

    pub fn set_steps(&mut self, steps: u32) {
        self.request.steps = snap(steps, MIN_STEPS, MAX_STEPS, 1);
    }

    pub fn set_seed(&mut self, seed: Option<u32>) {
        self.request.seed = seed;
    }

    pub fn use_example(&mut self, position: usize) -> bool {
        match example_prompt(position) {
            Some(prompt) => {
                self.set_prompt(prompt);
                true
            }
            None => false,
        }
    }
}
