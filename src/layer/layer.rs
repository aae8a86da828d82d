use crate::{
    draw::drawing::Drawing,
    effects::effect::Effect,
    foundation::{
        core::{FrameIndex, Vec2},
        error::{FlipbookError, FlipbookResult},
    },
};

/// What a layer draws itself, before its sublayers.
///
/// Implementations must be pure in `frame`: the same frame always records the same commands,
/// and nothing is mutated, so frames can render in any order or concurrently.
pub trait LayerContent: Send + Sync {
    fn draw(&self, drawing: &mut Drawing, frame: FrameIndex) -> FlipbookResult<()>;
}

impl<F> LayerContent for F
where
    F: Fn(&mut Drawing, FrameIndex) -> FlipbookResult<()> + Send + Sync,
{
    fn draw(&self, drawing: &mut Drawing, frame: FrameIndex) -> FlipbookResult<()> {
        self(drawing, frame)
    }
}

/// Node of the scene tree: optional content, effects, and positioned sublayers.
///
/// A layer's effects cover its own content and its whole sublayer subtree, and are undone by
/// the `save`/`restore` pair around [`Layer::draw_with_effects`].
#[derive(Default)]
pub struct Layer {
    name: Option<String>,
    content: Option<Box<dyn LayerContent>>,
    effects: Vec<Effect>,
    sublayers: Vec<(Layer, Vec2)>,
}

impl Layer {
    /// Layer with no content of its own, used to group sublayers under shared effects.
    pub fn group() -> Self {
        Self::default()
    }

    pub fn new(content: impl LayerContent + 'static) -> Self {
        Self {
            content: Some(Box::new(content)),
            ..Self::default()
        }
    }

    /// Name reported in errors raised while drawing this layer.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn add_effect(&mut self, effect: impl Into<Effect>) -> &mut Self {
        self.effects.push(effect.into());
        self
    }

    pub fn add_sublayer(&mut self, layer: Layer, position: impl Into<Vec2>) -> &mut Self {
        self.sublayers.push((layer, position.into()));
        self
    }

    pub fn with_effect(mut self, effect: impl Into<Effect>) -> Self {
        self.add_effect(effect);
        self
    }

    pub fn with_sublayer(mut self, layer: Layer, position: impl Into<Vec2>) -> Self {
        self.add_sublayer(layer, position);
        self
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn sublayers(&self) -> &[(Layer, Vec2)] {
        &self.sublayers
    }

    /// Own content, then sublayers. Effects are not applied here.
    pub fn draw(&self, drawing: &mut Drawing, frame: FrameIndex) -> FlipbookResult<()> {
        if let Some(content) = &self.content {
            content
                .draw(drawing, frame)
                .map_err(|e| self.attribute(e, "content"))?;
        }
        self.draw_sublayers(drawing, frame)
    }

    pub fn draw_sublayers(&self, drawing: &mut Drawing, frame: FrameIndex) -> FlipbookResult<()> {
        for (idx, (layer, offset)) in self.sublayers.iter().enumerate() {
            drawing.save();
            drawing.translate(offset.x, offset.y);
            layer
                .draw_with_effects(drawing, frame)
                .map_err(|e| self.attribute(e, &format!("sublayer #{idx}")))?;
            drawing.restore()?;
        }
        Ok(())
    }

    pub fn draw_with_effects(&self, drawing: &mut Drawing, frame: FrameIndex) -> FlipbookResult<()> {
        drawing.save();
        for (idx, effect) in self.effects.iter().enumerate() {
            effect.draw_on(drawing, frame).map_err(|e| {
                self.attribute(e, &format!("effect #{idx} ({})", effect.name()))
            })?;
        }
        self.draw(drawing, frame)?;
        drawing.restore()?;
        Ok(())
    }

    fn attribute(&self, err: FlipbookError, what: &str) -> FlipbookError {
        match &self.name {
            Some(name) => err.context(format!("layer '{name}' {what}")),
            None => err.context(what.to_string()),
        }
    }
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("has_content", &self.content.is_some())
            .field("effects", &self.effects)
            .field("sublayers", &self.sublayers)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/layer.rs"]
mod tests;
