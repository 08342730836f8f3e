/// Full-window image viewer
///
/// Black backdrop with the image centred and a navigation bar underneath.
/// Clicking the backdrop closes the viewer; clicking the image or the
/// navigation bar does not.
use iced::widget::image::Handle;
use iced::widget::{self, button, column, container, horizontal_space, mouse_area, row, text};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::Message;

/// Height of the navigation bar below the image
pub const NAV_BAR_HEIGHT: f32 = 44.0;

/// What the viewer is currently showing
#[derive(Debug, Clone, Default)]
pub enum Picture {
    #[default]
    Loading,
    Ready(Handle),
    Failed(String),
}

/// Parts of the viewer that react to a plain click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Black area around the image
    Backdrop,
    /// The image itself
    Picture,
    /// The bar holding the arrows and caption
    NavBar,
}

/// Message sent when `region` is clicked
pub fn on_click(region: Region) -> Message {
    match region {
        Region::Backdrop => Message::CloseViewer,
        Region::Picture | Region::NavBar => Message::Noop,
    }
}

pub fn view<'a>(picture: &'a Picture, caption: String) -> Element<'a, Message> {
    let body: Element<'a, Message> = match picture {
        Picture::Loading => text("Loading…").color(Color::WHITE).into(),
        Picture::Ready(handle) => mouse_area(
            widget::image(handle.clone()).content_fit(ContentFit::ScaleDown),
        )
        .on_press(on_click(Region::Picture))
        .into(),
        Picture::Failed(message) => text(message.as_str()).color(Color::WHITE).into(),
    };

    let nav = row![
        button(text("◀")).on_press(Message::ShowPrev),
        horizontal_space(),
        text(caption).color(Color::WHITE),
        horizontal_space(),
        button(text("▶")).on_press(Message::ShowNext),
    ]
    .padding(6)
    .height(Length::Fixed(NAV_BAR_HEIGHT))
    .align_y(Alignment::Center);

    let nav = mouse_area(nav).on_press(on_click(Region::NavBar));

    let content = column![container(body).center(Length::Fill), nav];

    mouse_area(
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Color::BLACK.into()),
                ..container::Style::default()
            }),
    )
    .on_press(on_click(Region::Backdrop))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_backdrop_clicks_close() {
        assert!(matches!(on_click(Region::Backdrop), Message::CloseViewer));
        assert!(matches!(on_click(Region::Picture), Message::Noop));
        assert!(matches!(on_click(Region::NavBar), Message::Noop));
    }
}
