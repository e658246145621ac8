#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Reset,
    Rgb(u8, u8, u8),
    Indexed(u8),
}

impl Color {
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GRAY: Color = Color::Indexed(7);
    pub const WHITE: Color = Color::Indexed(15);

    /// Parses `#rrggbb` or a terminal color name (`cyan`, `dark_gray`, ...).
    pub fn parse(value: &str) -> Option<Color> {
        let v = value.trim();
        if v.is_empty() {
            return None;
        }

        if let Some(hex) = v.strip_prefix('#') {
            if hex.len() == 6 {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                return Some(Color::Rgb(r, g, b));
            }
            return None;
        }

        let v = v.to_ascii_lowercase();
        let c = match v.as_str() {
            "reset" => Color::Reset,
            "black" => Color::Indexed(0),
            "red" => Color::Indexed(1),
            "green" => Color::Indexed(2),
            "yellow" => Color::Indexed(3),
            "blue" => Color::Indexed(4),
            "magenta" | "purple" => Color::Indexed(5),
            "cyan" => Color::Indexed(6),
            "gray" | "grey" => Color::Indexed(7),
            "dark_gray" | "darkgrey" => Color::Indexed(8),
            "white" => Color::Indexed(15),
            "light_red" => Color::Indexed(9),
            "light_green" => Color::Indexed(10),
            "light_yellow" => Color::Indexed(11),
            "light_blue" => Color::Indexed(12),
            "light_magenta" => Color::Indexed(13),
            "light_cyan" => Color::Indexed(14),
            _ => return None,
        };

        Some(c)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Style {
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Merge `other` on top of `self`.
    pub fn patch(mut self, other: Style) -> Self {
        if let Some(fg) = other.fg {
            self.fg = Some(fg);
        }
        if let Some(bg) = other.bg {
            self.bg = Some(bg);
        }
        self
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/style.rs"]
mod tests;
