use std::{collections::HashMap, path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{FlipbookError, FlipbookResult};

/// Font file bytes (TTF/OTF) used by `text` commands.
///
/// Fonts are loaded at scene-construction time so replay never touches the filesystem.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    index: u32,
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>) -> FlipbookResult<Self> {
        if bytes.is_empty() {
            return Err(FlipbookError::validation("font bytes must be non-empty"));
        }
        Ok(Self {
            data: Arc::new(bytes),
            index: 0,
        })
    }

    pub fn open(path: impl AsRef<Path>) -> FlipbookResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn key(&self) -> usize {
        Arc::as_ptr(&self.data) as usize
    }
}

/// Brush carried through Parley layouts (straight-alpha RGBA8).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrush {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Shapes text runs with Parley, registering each distinct font once per engine.
pub(crate) struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    families: HashMap<usize, String>,
    fonts: HashMap<usize, vello_cpu::peniko::FontData>,
}

impl TextEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    fn family_for(&mut self, face: &FontFace) -> FlipbookResult<String> {
        if let Some(name) = self.families.get(&face.key()) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.data.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            FlipbookError::validation("no font families registered from font bytes")
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FlipbookError::validation("registered font family has no name"))?
            .to_string();

        self.families.insert(face.key(), family_name.clone());
        Ok(family_name)
    }

    pub(crate) fn font_data(&mut self, face: &FontFace) -> vello_cpu::peniko::FontData {
        self.fonts
            .entry(face.key())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.data.as_ref().clone()),
                    face.index,
                )
            })
            .clone()
    }

    /// Shape and lay out a single-paragraph plain text run.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
        brush: TextBrush,
    ) -> FlipbookResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FlipbookError::validation(
                "font size must be finite and > 0",
            ));
        }
        let family_name = self.family_for(face)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Extents of a laid-out single-paragraph text run, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
    /// Distance from the top of the run to its first baseline.
    pub baseline: f64,
}

impl TextExtents {
    pub fn measure(text: &str, face: &FontFace, size: f64) -> FlipbookResult<Self> {
        let layout = TextEngine::new().layout_plain(text, face, size as f32, TextBrush::default())?;
        Ok(Self::of(&layout))
    }

    pub(crate) fn of(layout: &parley::Layout<TextBrush>) -> Self {
        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0);
        Self {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            baseline,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/text.rs"]
mod tests;
