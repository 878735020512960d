//! Static theme for the front end's CSS build: palette, content globs and
//! plugins. Pure data; the only behavior is rendering it for build tools.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorToken {
    Background,
    BackgroundDark,
    BackgroundHover,
    BackgroundHoverDark,
    BackgroundHighlight,
    BackgroundHighlightHover,
    BackgroundHighlightActive,
    BackgroundHighlightDark,
    BackgroundHighlightHoverDark,
    BackgroundHighlightActiveDark,
    DecorationFaint,
    DecorationFaintDark,
    DecorationNormal,
    Foreground,
    ForegroundDark,
    White,
    Black,
    Green,
    GreenHover,
    GreenActive,
    Inherit,
}

impl ColorToken {
    pub const ALL: [ColorToken; 21] = [
        ColorToken::Background,
        ColorToken::BackgroundDark,
        ColorToken::BackgroundHover,
        ColorToken::BackgroundHoverDark,
        ColorToken::BackgroundHighlight,
        ColorToken::BackgroundHighlightHover,
        ColorToken::BackgroundHighlightActive,
        ColorToken::BackgroundHighlightDark,
        ColorToken::BackgroundHighlightHoverDark,
        ColorToken::BackgroundHighlightActiveDark,
        ColorToken::DecorationFaint,
        ColorToken::DecorationFaintDark,
        ColorToken::DecorationNormal,
        ColorToken::Foreground,
        ColorToken::ForegroundDark,
        ColorToken::White,
        ColorToken::Black,
        ColorToken::Green,
        ColorToken::GreenHover,
        ColorToken::GreenActive,
        ColorToken::Inherit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorToken::Background => "background",
            ColorToken::BackgroundDark => "background-dark",
            ColorToken::BackgroundHover => "background-hover",
            ColorToken::BackgroundHoverDark => "background-hover-dark",
            ColorToken::BackgroundHighlight => "background-highlight",
            ColorToken::BackgroundHighlightHover => "background-highlight-hover",
            ColorToken::BackgroundHighlightActive => "background-highlight-active",
            ColorToken::BackgroundHighlightDark => "background-highlight-dark",
            ColorToken::BackgroundHighlightHoverDark => "background-highlight-hover-dark",
            ColorToken::BackgroundHighlightActiveDark => "background-highlight-active-dark",
            ColorToken::DecorationFaint => "decoration-faint",
            ColorToken::DecorationFaintDark => "decoration-faint-dark",
            ColorToken::DecorationNormal => "decoration-normal",
            ColorToken::Foreground => "foreground",
            ColorToken::ForegroundDark => "foreground-dark",
            ColorToken::White => "white",
            ColorToken::Black => "black",
            ColorToken::Green => "green",
            ColorToken::GreenHover => "green-hover",
            ColorToken::GreenActive => "green-active",
            ColorToken::Inherit => "inherit",
        }
    }

    /// CSS color value.
    pub fn value(self) -> &'static str {
        match self {
            ColorToken::Background => "#f4f4f4",
            ColorToken::BackgroundDark => "#242424",
            ColorToken::BackgroundHover => "rgb(229 229 229)",
            ColorToken::BackgroundHoverDark => "rgb(82 82 82)",
            ColorToken::BackgroundHighlight => "rgb(255 255 255)",
            ColorToken::BackgroundHighlightHover => "rgb(235 235 235)",
            ColorToken::BackgroundHighlightActive => "rgb(225 225 225)",
            ColorToken::BackgroundHighlightDark => "rgb(48 48 48)",
            ColorToken::BackgroundHighlightHoverDark => "rgb(58 58 58)",
            ColorToken::BackgroundHighlightActiveDark => "rgb(68 68 68)",
            ColorToken::DecorationFaint => "rgb(212 212 212)",
            ColorToken::DecorationFaintDark => "rgb(48 48 48)",
            ColorToken::DecorationNormal => "rgb(115 115 115)",
            ColorToken::Foreground => "rgb(56 56 56)",
            ColorToken::ForegroundDark => "rgb(229 229 229)",
            ColorToken::White => "rgb(255 255 255)",
            ColorToken::Black => "rgb(0 0 0)",
            ColorToken::Green => "#008859",
            ColorToken::GreenHover => "#009869",
            ColorToken::GreenActive => "#00a879",
            ColorToken::Inherit => "inherit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plugin {
    LineClamp,
}

impl Plugin {
    pub fn package(self) -> &'static str {
        match self {
            Plugin::LineClamp => "@tailwindcss/line-clamp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// Toggled by a `dark` class on an ancestor.
    Class,
    /// Follows `prefers-color-scheme`.
    Media,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub content: Vec<String>,
    pub colors: Vec<ColorToken>,
    pub plugins: Vec<Plugin>,
    pub dark_mode: DarkMode,
    pub important: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            content: vec![
                "./public/index.html".to_string(),
                "./src/**/*.svelte".to_string(),
            ],
            colors: ColorToken::ALL.to_vec(),
            plugins: vec![Plugin::LineClamp],
            dark_mode: DarkMode::Class,
            important: true,
        }
    }
}

impl ThemeConfig {
    pub fn palette(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.colors.iter().map(|token| (token.name(), token.value()))
    }

    pub fn color(&self, name: &str) -> Option<&'static str> {
        ColorToken::from_name(name)
            .filter(|token| self.colors.contains(token))
            .map(ColorToken::value)
    }

    /// Renders the palette as CSS custom properties on `:root`.
    pub fn to_css_variables(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.palette() {
            css.push_str(&format!("  --color-{}: {};\n", name, value));
        }
        css.push('}');
        css.push('\n');
        css
    }

    /// Build-tool shape of the configuration.
    pub fn to_json(&self) -> Value {
        let colors: Map<String, Value> = self
            .palette()
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect();
        let plugins: Vec<&str> = self.plugins.iter().map(|p| p.package()).collect();

        json!({
            "content": self.content,
            "theme": { "extend": {}, "colors": colors },
            "plugins": plugins,
            "darkMode": self.dark_mode,
            "important": self.important,
        })
    }
}
