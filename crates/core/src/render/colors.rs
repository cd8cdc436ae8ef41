use serde::Serialize;

use super::ColorScheme;
use crate::graph::Predicate;

/// Coarse grouping of well-known tags, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Structural,
    Text,
    List,
    Table,
    Form,
    Media,
    Meta,
    Unknown,
}

const STRUCTURAL_TAGS: &[&str] = &[
    "html", "head", "body", "div", "span", "section", "article", "nav", "header", "footer",
    "main", "aside",
];

const TEXT_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "a", "strong", "em", "b", "i", "u", "s", "small",
    "code", "pre", "blockquote", "br", "hr", "label", "abbr", "cite", "mark", "sub", "sup", "q",
    "time",
];

const LIST_TAGS: &[&str] = &["ul", "ol", "li", "dl", "dt", "dd", "menu"];

const TABLE_TAGS: &[&str] = &[
    "table", "thead", "tbody", "tfoot", "tr", "td", "th", "caption", "colgroup", "col",
];

const FORM_TAGS: &[&str] = &[
    "form", "input", "button", "select", "option", "optgroup", "textarea", "fieldset", "legend",
    "datalist", "output",
];

const MEDIA_TAGS: &[&str] = &[
    "img", "video", "audio", "source", "picture", "svg", "canvas", "iframe", "figure",
    "figcaption", "track", "embed", "object",
];

const META_TAGS: &[&str] = &[
    "meta", "link", "title", "script", "style", "base", "noscript", "template",
];

impl TagCategory {
    pub fn of(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        let tag = tag.as_str();
        [
            (STRUCTURAL_TAGS, TagCategory::Structural),
            (TEXT_TAGS, TagCategory::Text),
            (LIST_TAGS, TagCategory::List),
            (TABLE_TAGS, TagCategory::Table),
            (FORM_TAGS, TagCategory::Form),
            (MEDIA_TAGS, TagCategory::Media),
            (META_TAGS, TagCategory::Meta),
        ]
        .into_iter()
        .find(|(tags, _)| tags.contains(&tag))
        .map(|(_, category)| category)
        .unwrap_or(TagCategory::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Structural => "structural",
            TagCategory::Text => "text",
            TagCategory::List => "list",
            TagCategory::Table => "table",
            TagCategory::Form => "form",
            TagCategory::Media => "media",
            TagCategory::Meta => "meta",
            TagCategory::Unknown => "unknown",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Fill, font and edge colors of one color scheme.
#[derive(Debug)]
pub struct Palette {
    /// Element fills by DOM depth, depth 1 first.
    pub depth: &'static [&'static str],
    /// Tag-node fills, in [`TagCategory`] order.
    pub category: [&'static str; 8],
    pub attr: &'static str,
    pub text: &'static str,
    pub script: &'static str,
    pub style: &'static str,
    pub font_dark: &'static str,
    pub font_light: &'static str,
    pub edge_child: &'static str,
    pub edge_text: &'static str,
    pub edge_tag: &'static str,
    pub edge_attr: &'static str,
    pub edge_script: &'static str,
    pub edge_style: &'static str,
    pub edge_other: &'static str,
}

static DEFAULT: Palette = Palette {
    depth: &[
        "#E3F2FD", "#BBDEFB", "#90CAF9", "#64B5F6", "#42A5F5", "#2196F3", "#1E88E5", "#1976D2",
        "#1565C0", "#0D47A1",
    ],
    category: [
        "#5C6BC0", "#66BB6A", "#FFA726", "#AB47BC", "#EF5350", "#26A69A", "#8D6E63", "#BDBDBD",
    ],
    attr: "#FFF3E0",
    text: "#F1F8E9",
    script: "#FFF9C4",
    style: "#F3E5F5",
    font_dark: "#212121",
    font_light: "#FFFFFF",
    edge_child: "#546E7A",
    edge_text: "#66BB6A",
    edge_tag: "#5C6BC0",
    edge_attr: "#FFA726",
    edge_script: "#FBC02D",
    edge_style: "#AB47BC",
    edge_other: "#9E9E9E",
};

static MONOCHROME: Palette = Palette {
    depth: &[
        "#FAFAFA", "#F0F0F0", "#E0E0E0", "#D0D0D0", "#BDBDBD", "#A8A8A8", "#969696", "#7F7F7F",
    ],
    category: [
        "#E0E0E0", "#D6D6D6", "#CCCCCC", "#C2C2C2", "#B8B8B8", "#AEAEAE", "#A4A4A4", "#9A9A9A",
    ],
    attr: "#F5F5F5",
    text: "#FFFFFF",
    script: "#EEEEEE",
    style: "#E8E8E8",
    font_dark: "#000000",
    font_light: "#FFFFFF",
    edge_child: "#424242",
    edge_text: "#757575",
    edge_tag: "#616161",
    edge_attr: "#9E9E9E",
    edge_script: "#616161",
    edge_style: "#616161",
    edge_other: "#BDBDBD",
};

static HIGH_CONTRAST: Palette = Palette {
    depth: &["#000000", "#1A1A1A", "#003366", "#330066", "#660000", "#004D00"],
    category: [
        "#FFFF00", "#00FFFF", "#FF00FF", "#00FF00", "#FF8000", "#FF0000", "#FFFFFF", "#C0C0C0",
    ],
    attr: "#FFD700",
    text: "#FFFFFF",
    script: "#00FF00",
    style: "#FF00FF",
    font_dark: "#000000",
    font_light: "#FFFFFF",
    edge_child: "#000000",
    edge_text: "#0000FF",
    edge_tag: "#FF0000",
    edge_attr: "#FF8000",
    edge_script: "#008000",
    edge_style: "#800080",
    edge_other: "#000000",
};

pub(super) fn palette(scheme: ColorScheme) -> &'static Palette {
    match scheme {
        ColorScheme::Default => &DEFAULT,
        ColorScheme::Monochrome => &MONOCHROME,
        ColorScheme::HighContrast => &HIGH_CONTRAST,
    }
}

impl Palette {
    /// Element fill for `depth`, clamped to the palette.
    pub fn element_fill(&self, depth: usize) -> &'static str {
        let index = depth.saturating_sub(1).min(self.depth.len() - 1);
        self.depth[index]
    }

    pub fn category_fill(&self, category: TagCategory) -> &'static str {
        self.category[category.index()]
    }

    pub fn edge_color(&self, predicate: Predicate) -> &'static str {
        match predicate {
            Predicate::Child => self.edge_child,
            Predicate::Text => self.edge_text,
            Predicate::Tag | Predicate::Element => self.edge_tag,
            Predicate::Attr | Predicate::Name | Predicate::Value => self.edge_attr,
            Predicate::Script => self.edge_script,
            Predicate::Style => self.edge_style,
            Predicate::Content => self.edge_other,
        }
    }

    /// Font color readable on `fill`.
    pub fn font_for(&self, fill: &str) -> &'static str {
        font_color_for(fill, self.font_dark, self.font_light)
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Darken a `#RRGGBB` color by `amount` per channel, clamped at 0.
/// Unparseable colors come back unchanged.
pub fn darken(color: &str, amount: u8) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => format!(
            "#{:02X}{:02X}{:02X}",
            r.saturating_sub(amount),
            g.saturating_sub(amount),
            b.saturating_sub(amount)
        ),
        None => color.to_string(),
    }
}

/// Pick `dark` on light fills and `light` on dark ones.
pub fn font_color_for(fill: &str, dark: &'static str, light: &'static str) -> &'static str {
    match parse_hex(fill) {
        Some((r, g, b)) => {
            let luminance = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
            if luminance > 150.0 {
                dark
            } else {
                light
            }
        }
        None => dark,
    }
}
