//! Category display helpers

/// Color used for categories the table does not know, including "All"
pub const DEFAULT_CATEGORY_COLOR: CategoryColor = CategoryColor("#78C850");

/// A `#RRGGBB` display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryColor(pub &'static str);

impl CategoryColor {
    pub fn hex(&self) -> &'static str {
        self.0
    }

    /// Red, green and blue components
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.0.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }
}

/// Display color for a category name
pub fn category_color(name: &str) -> CategoryColor {
    let hex = match name {
        "normal" => "#A8A77A",
        "fire" => "#EE8130",
        "water" => "#6390F0",
        "electric" => "#F7D02C",
        "grass" => "#7AC74C",
        "ice" => "#96D9D6",
        "fighting" => "#C22E28",
        "poison" => "#A33EA1",
        "ground" => "#E2BF65",
        "flying" => "#A98FF3",
        "psychic" => "#F95587",
        "bug" => "#A6B91A",
        "rock" => "#B6A136",
        "ghost" => "#735797",
        "dragon" => "#6F35FC",
        "dark" => "#705746",
        "steel" => "#B7B7CE",
        "fairy" => "#D685AD",
        _ => return DEFAULT_CATEGORY_COLOR,
    };
    CategoryColor(hex)
}

/// Category label with its first character upper-cased
pub fn display_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_color() {
        assert_eq!(category_color("fire").hex(), "#EE8130");
        assert_eq!(category_color("fire").rgb(), (0xEE, 0x81, 0x30));
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(category_color("shadow"), DEFAULT_CATEGORY_COLOR);
        assert_eq!(category_color("All"), DEFAULT_CATEGORY_COLOR);
        // The table is keyed by the service's lowercase names
        assert_eq!(category_color("Fire"), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("fire"), "Fire");
        assert_eq!(display_label("All"), "All");
        assert_eq!(display_label(""), "");
    }
}
