use colored::*;
use std::path::Path;

use crate::models::{GenerationRequest, GenerationResult, EXAMPLE_PROMPTS};

pub const TITLE: &str = "🎨 Realtime FLUX — RU версия";
pub const SUBTITLE: &str = "Генерация изображений с помощью FLUX.1-schnell";
pub const FOOTER: &str = "🎨 Создано с помощью FLUX.1-schnell от Black Forest Labs";
pub const BUSY: &str = "🎨 Генерируем изображение...";
pub const SUCCESS: &str = "✅ Готово! Изображение сгенерировано успешно";
pub const EMPTY_PROMPT: &str = "❌ Пожалуйста, введите описание изображения";

pub fn header() -> String {
    format!("{}\n{}\n", TITLE.bold(), SUBTITLE.bright_black())
}

pub fn footer() -> String {
    format!("---\n{}", FOOTER.bold())
}

pub fn form(request: &GenerationRequest) -> String {
    let seed = request
        .seed
        .map(|seed| seed.to_string())
        .unwrap_or_else(|| "случайный".to_string());

    [
        format!("📝 Описание изображения на русском: {}", request.prompt.cyan()),
        format!("📏 Ширина: {}", request.width.to_string().cyan()),
        format!("📐 Высота: {}", request.height.to_string().cyan()),
        format!("🔄 Шаги: {}", request.steps.to_string().cyan()),
        format!("🎲 Seed: {}", seed.cyan()),
    ]
    .join("\n")
}

pub fn help() -> String {
    [
        "Команды:",
        "  p <текст>     описание изображения",
        "  w <n> / h <n> ширина / высота (512–1024, шаг 64)",
        "  s <n>         шаги (1–4)",
        "  seed <n|none> зафиксировать или сбросить seed",
        "  x [k]         примеры промптов / выбрать пример k",
        "  f             показать форму",
        "  g или Enter   🚀 Сгенерировать изображение",
        "  q             выход",
    ]
    .join("\n")
}

pub fn examples() -> String {
    let mut lines = vec!["💡 Примеры промптов".bold().to_string()];
    for (position, example) in EXAMPLE_PROMPTS.iter().enumerate() {
        lines.push(format!("  {}. 📋 {}", position + 1, example));
    }
    lines.join("\n")
}

pub fn success(request: &GenerationRequest, result: &GenerationResult, saved_to: &Path) -> String {
    let (width, height) = result.dimensions();
    let mut lines = vec![
        SUCCESS.green().bold().to_string(),
        "Параметры генерации:".bold().to_string(),
        format!("- 📝 Промпт: {}", request.summary()),
        format!("- 📐 Размер: {}×{}", request.width, request.height),
        format!("- 🔄 Шагов: {}", request.steps),
    ];
    if let Some(seed) = result.seed {
        lines.push(format!("- 🎲 Seed: {}", seed));
    }
    lines.push(format!(
        "✨ Сгенерированное изображение ({}×{}): {}",
        width,
        height,
        saved_to.display().to_string().underline()
    ));
    lines.join("\n")
}

pub fn error(message: &str) -> String {
    message.red().to_string()
}
