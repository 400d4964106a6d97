//! Terminal colors for list and search output.

use clerk_core::Marker;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const PURPLE: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    item: &'static str,
    kind: &'static str,
    reset: &'static str,
    pub marker: Marker,
}

impl Palette {
    pub const ANSI: Palette = Palette {
        item: PURPLE,
        kind: CYAN,
        reset: RESET,
        marker: Marker {
            open: RED,
            close: RESET,
        },
    };

    pub const PLAIN: Palette = Palette {
        item: "",
        kind: "",
        reset: "",
        marker: Marker { open: "", close: "" },
    };

    pub fn for_terminal(no_color: bool) -> Self {
        if no_color {
            Self::PLAIN
        } else {
            Self::ANSI
        }
    }

    /// Listed entities.
    pub fn item(&self, text: &str) -> String {
        format!("{}{text}{}", self.item, self.reset)
    }

    /// Entity kind label above a search hit.
    pub fn kind(&self, text: &str) -> String {
        format!("{}{text}{}", self.kind, self.reset)
    }
}

#[cfg(test)]
mod tests {
    use super::Palette;

    #[test]
    fn plain_palette_adds_nothing() {
        assert_eq!(Palette::PLAIN.item("- id: 1"), "- id: 1");
        assert_eq!(Palette::PLAIN.kind("task"), "task");
    }

    #[test]
    fn ansi_palette_resets_after_text() {
        assert_eq!(Palette::ANSI.kind("note"), "\x1b[36mnote\x1b[0m");
        assert!(Palette::ANSI.item("x").ends_with("\x1b[0m"));
    }
}
