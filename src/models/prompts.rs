pub const DEFAULT_PROMPT: &str = "Красивый закат над морем в стиле импрессионизма";

pub const EXAMPLE_PROMPTS: [&str; 5] = [
    "Красивый закат над морем в стиле импрессионизма",
    "Футуристический город с летающими машинами",
    "Портрет кота в костюме астронавта",
    "Волшебный лес с светящимися грибами",
    "Космический корабль в далекой галактике",
];

/// Example prompt by its 1-based position in the list.
pub fn example_prompt(position: usize) -> Option<&'static str> {
    position
        .checked_sub(1)
        .and_then(|index| EXAMPLE_PROMPTS.get(index))
        .copied()
}
