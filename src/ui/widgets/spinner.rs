// SPDX-License-Identifier: MPL-2.0
//! Loading spinner widget drawn on a Canvas.
//!
//! A ring of dots whose opacity trails behind the rotation angle. The widget
//! itself is stateless; the caller advances the angle on an animation tick
//! and rebuilds the element.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::TAU;

/// Number of dots in the ring.
const DOT_COUNT: usize = 8;

/// Dot radius relative to the ring radius.
const DOT_SCALE: f32 = 0.16;

/// Angle advanced per animation tick, in radians.
pub const TICK_STEP: f32 = TAU / 48.0;

/// A ring-of-dots spinner.
pub struct Spinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: f32,
}

impl Spinner {
    /// Creates a spinner with the given color and current rotation angle.
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::ICON_XL,
        }
    }

    /// Creates a Canvas widget from this spinner.
    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let ring_radius = frame.width().min(frame.height()) / 2.0 - 4.0;
                let dot_radius = ring_radius * DOT_SCALE;

                #[allow(clippy::cast_precision_loss)] // DOT_COUNT is tiny
                for i in 0..DOT_COUNT {
                    let slot = i as f32 / DOT_COUNT as f32;
                    let angle = self.rotation + slot * TAU;
                    let position = Point::new(
                        center.x + ring_radius * angle.cos(),
                        center.y + ring_radius * angle.sin(),
                    );

                    // The dot at the rotation angle is fully opaque; each
                    // following dot fades toward the tail.
                    let alpha = 0.15 + 0.85 * (1.0 - slot);
                    let dot = Path::circle(position, dot_radius);
                    frame.fill(
                        &dot,
                        Color {
                            a: alpha,
                            ..self.color
                        },
                    );
                }
            });

        vec![geometry]
    }
}

/// Advances a rotation angle by one tick, wrapping at a full turn.
#[must_use]
pub fn advance(rotation: f32) -> f32 {
    let next = rotation + TICK_STEP;
    if next > TAU {
        next - TAU
    } else {
        next
    }
}
