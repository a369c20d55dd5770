/// Shown for any category without a dedicated emoji.
pub const UNKNOWN_EMOJI: &str = "❓";

const CATEGORY_EMOJIS: &[(&str, &str)] = &[
    ("fire", "🔥"),
    ("water", "💧"),
    ("bug", "🐛"),
    ("dragon", "🐉"),
    ("electric", "⚡"),
    ("ghost", "👻"),
    ("fairy", "🧚"),
    ("ice", "❄️"),
    ("fighting", "🥊"),
    ("normal", "⚪"),
    ("grass", "🌿"),
    ("psychic", "🧠"),
    ("rock", "⛰️"),
    ("dark", "🌑"),
    ("ground", "🌍"),
    ("poison", "☠️"),
    ("flying", "🦅"),
    ("steel", "⚙️"),
];

pub fn category_emoji(category: &str) -> &'static str {
    CATEGORY_EMOJIS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, emoji)| *emoji)
        .unwrap_or(UNKNOWN_EMOJI)
}

/// Emojis for every category, concatenated in order.
pub fn emojis_for(categories: &[String]) -> String {
    categories.iter().map(|c| category_emoji(c)).collect()
}
