// SPDX-License-Identifier: MPL-2.0
//! Comparison panel.
//!
//! Draws the original left of a movable split and the compressed image right
//! of it, both covering the same surface, plus size cards and the reduction
//! percentage once a compressed image exists.

use crate::config::defaults::{DEFAULT_SPLIT_PERCENT, MAX_SPLIT_PERCENT};
use crate::i18n::fluent::I18n;
use crate::media::metrics::{format_file_size, size_reduction_percent};
use crate::media::{CompressedImage, ImageRecord};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::Handle;
use iced::widget::{canvas, container, slider, text, Column, Container, Row, Stack};
use iced::{mouse, Element, Length, Point, Rectangle, Size, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    position: u8,
}

impl Default for State {
    fn default() -> Self {
        Self {
            position: DEFAULT_SPLIT_PERCENT,
        }
    }
}

impl State {
    /// Split position in percent of the surface width.
    pub fn position(&self) -> u8 {
        self.position
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    SplitChanged(u8),
}

/// Contextual data needed to render the panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    pub original: Option<&'a ImageRecord>,
    pub compressed: Option<&'a CompressedImage>,
    pub busy: bool,
}

pub fn update(state: &mut State, message: Message) {
    match message {
        Message::SplitChanged(position) => state.position = position.min(MAX_SPLIT_PERCENT),
    }
}

/// Fraction of the width at which the split is drawn.
pub fn split_fraction(position: u8) -> f32 {
    f32::from(position.min(MAX_SPLIT_PERCENT)) / f32::from(MAX_SPLIT_PERCENT)
}

/// Split position for a cursor at `x` on a surface of the given width.
pub fn position_at(x: f32, width: f32) -> u8 {
    if width <= 0.0 {
        return DEFAULT_SPLIT_PERCENT;
    }
    let percent = (x / width * f32::from(MAX_SPLIT_PERCENT)).round();
    percent.clamp(0.0, f32::from(MAX_SPLIT_PERCENT)) as u8
}

/// Rectangle that covers `surface` with an image of the given pixel size,
/// centered and cropped by the caller. Unknown sizes stretch to the surface.
pub fn cover_rect(surface: Size, image: Option<(u32, u32)>) -> Rectangle {
    let Some((width, height)) = image.filter(|(w, h)| *w > 0 && *h > 0) else {
        return Rectangle::new(Point::ORIGIN, surface);
    };
    let (width, height) = (width as f32, height as f32);
    let scale = (surface.width / width).max(surface.height / height);
    let size = Size::new(width * scale, height * scale);
    Rectangle::new(
        Point::new(
            (surface.width - size.width) / 2.0,
            (surface.height - size.height) / 2.0,
        ),
        size,
    )
}

/// Left and right clip regions of a surface split at `fraction`.
pub fn split_regions(surface: Size, fraction: f32) -> (Rectangle, Rectangle) {
    let split_x = surface.width * fraction.clamp(0.0, 1.0);
    (
        Rectangle::new(Point::ORIGIN, Size::new(split_x, surface.height)),
        Rectangle::new(
            Point::new(split_x, 0.0),
            Size::new(surface.width - split_x, surface.height),
        ),
    )
}

fn relative_to(rect: Rectangle, region: Rectangle) -> Rectangle {
    Rectangle {
        x: rect.x - region.x,
        y: rect.y - region.y,
        ..rect
    }
}

struct ImageLayer<'a> {
    handle: &'a Handle,
    dimensions: Option<(u32, u32)>,
}

/// Canvas program drawing the split view.
struct SplitView<'a> {
    original: ImageLayer<'a>,
    compressed: Option<ImageLayer<'a>>,
    position: u8,
}

#[derive(Debug, Default)]
struct DragState {
    dragging: bool,
}

impl SplitView<'_> {
    fn draw_clipped(frame: &mut canvas::Frame, layer: &ImageLayer<'_>, region: Rectangle, surface: Size) {
        if region.width <= 0.0 {
            return;
        }
        let target = cover_rect(surface, layer.dimensions);
        frame.with_clip(region, |clipped| {
            clipped.draw_image(
                relative_to(target, region),
                canvas::Image::new(layer.handle.clone()),
            );
        });
    }
}

impl canvas::Program<Message> for SplitView<'_> {
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        use iced::widget::Action;

        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                state.dragging = true;
                Some(
                    Action::publish(Message::SplitChanged(position_at(position.x, bounds.width)))
                        .and_capture(),
                )
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { position }) if state.dragging => {
                let x = position.x - bounds.x;
                Some(
                    Action::publish(Message::SplitChanged(position_at(x, bounds.width)))
                        .and_capture(),
                )
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                state.dragging = false;
                None
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let surface = bounds.size();
        let (left, right) = split_regions(surface, split_fraction(self.position));

        Self::draw_clipped(&mut frame, &self.original, left, surface);
        if let Some(compressed) = &self.compressed {
            Self::draw_clipped(&mut frame, compressed, right, surface);
        }

        let line_x = left.width - sizing::SPLIT_LINE_WIDTH / 2.0;
        frame.fill_rectangle(
            Point::new(line_x, 0.0),
            Size::new(sizing::SPLIT_LINE_WIDTH, surface.height),
            palette::WHITE,
        );

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.dragging || cursor.is_over(bounds) {
            mouse::Interaction::ResizingHorizontally
        } else {
            mouse::Interaction::default()
        }
    }
}

fn badge<'a>(label: String, align: Horizontal) -> Element<'a, Message> {
    Container::new(
        container(text(label).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::XS])
            .style(styles::container::overlay_badge),
    )
    .padding(spacing::XS)
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(align)
    .align_y(Vertical::Top)
    .into()
}

fn placeholder<'a>(message: String) -> Element<'a, Message> {
    container(text(message).size(typography::BODY))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(sizing::COMPARISON_HEIGHT))
        .style(styles::container::tile)
        .into()
}

fn size_card<'a>(label: String, size: u64, success: bool) -> Element<'a, Message> {
    let value = text(format_file_size(size as i64)).size(typography::BODY);
    let value = if success {
        value.color(palette::SUCCESS_500)
    } else {
        value
    };
    let card = container(
        Column::new()
            .spacing(spacing::XXS)
            .align_x(Horizontal::Center)
            .push(text(label).size(typography::BODY))
            .push(value),
    )
    .padding(spacing::SM)
    .center_x(Length::Fill);

    if success {
        card.style(styles::container::success_tile).into()
    } else {
        card.style(styles::container::tile).into()
    }
}

fn build_surface<'a>(
    ctx: &ViewContext<'a>,
    original: &'a ImageRecord,
) -> Element<'a, Message> {
    let split = SplitView {
        original: ImageLayer {
            handle: original.preview.handle(),
            dimensions: original.preview.dimensions(),
        },
        compressed: ctx.compressed.map(|compressed| ImageLayer {
            handle: compressed.record.preview.handle(),
            dimensions: compressed.record.preview.dimensions(),
        }),
        position: ctx.state.position,
    };

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fixed(sizing::COMPARISON_HEIGHT))
        .push(canvas::Canvas::new(split).width(Length::Fill).height(Length::Fill))
        .push(badge(ctx.i18n.tr("comparison-original"), Horizontal::Left));
    if ctx.compressed.is_some() {
        layers = layers.push(badge(ctx.i18n.tr("comparison-compressed"), Horizontal::Right));
    }
    layers.into()
}

fn build_statistics<'a>(
    ctx: &ViewContext<'a>,
    original: &'a ImageRecord,
    compressed: &'a CompressedImage,
) -> Element<'a, Message> {
    let reduction = size_reduction_percent(original.size, compressed.record.size).unwrap_or(0);

    Column::new()
        .spacing(spacing::SM)
        .push(slider(
            0..=MAX_SPLIT_PERCENT,
            ctx.state.position,
            Message::SplitChanged,
        ))
        .push(
            Row::new()
                .spacing(spacing::MD)
                .push(size_card(ctx.i18n.tr("comparison-original"), original.size, false))
                .push(size_card(
                    ctx.i18n.tr("comparison-compressed"),
                    compressed.record.size,
                    true,
                )),
        )
        .push(
            container(
                text(format!(
                    "{reduction}% {}",
                    ctx.i18n.tr("comparison-size-reduction")
                ))
                .size(typography::BODY_LG)
                .color(palette::PRIMARY_500),
            )
            .padding(spacing::SM)
            .center_x(Length::Fill)
            .style(styles::container::tile),
        )
        .into()
}

/// Render the comparison panel.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(spacing::MD)
        .push(text(ctx.i18n.tr("comparison-title")).size(typography::TITLE_SM));

    content = match ctx.original {
        None => content.push(placeholder(ctx.i18n.tr("comparison-upload-first"))),
        Some(_) if ctx.busy => content.push(placeholder(ctx.i18n.tr("comparison-compressing-image"))),
        Some(original) => {
            let mut column = content.push(build_surface(&ctx, original));
            if let Some(compressed) = ctx.compressed {
                column = column.push(build_statistics(&ctx, original, compressed));
            }
            column
        }
    };

    Container::new(content)
        .padding(spacing::LG)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}
