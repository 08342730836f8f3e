use iced::keyboard::{self, key::Named, Key};
use iced::widget::image::Handle;
use iced::widget::{button, column, responsive, row, scrollable, slider, text};
use iced::{window, Alignment, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

mod config;
mod error;
mod imaging;
mod state;
mod ui;

use config::{Settings, MAX_THUMB_SIZE, MIN_THUMB_SIZE};
use error::GalleryResult;
use state::debounce::Debounce;
use state::gallery::{Gallery, SortOrder};
use state::thumbnails::{ThumbKey, ThumbnailCache};
use state::viewer::ViewerState;
use ui::viewer::Picture;

/// How long the size slider must be still before thumbnails are regenerated
const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Initial window size
const WINDOW_SIZE: Size = Size {
    width: 1200.0,
    height: 800.0,
};

/// Main application state
struct Pinsplorer {
    /// Persisted user settings
    settings: Settings,
    /// Where settings are saved; `None` when no config directory exists
    settings_path: Option<PathBuf>,
    /// The opened folder and its images in display order
    gallery: Gallery,
    /// Decoded thumbnails for the current folder at the settled size
    thumbnails: ThumbnailCache<Handle>,
    /// Caps how many thumbnails decode at once
    decode_permits: Arc<Semaphore>,
    /// Size shown on the slider; may run ahead of the cache until it settles
    thumb_size: u32,
    resize_debounce: Debounce,
    /// Set while the full-window viewer is open
    viewer: Option<ViewerState>,
    picture: Picture,
    /// Last known window size, used to size viewer images
    window_size: Size,
    /// Problem to show ahead of the status line (e.g. an unreadable folder)
    notice: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Select Folder"
    SelectFolder,
    /// User clicked "Randomize"
    Randomize,
    /// User clicked one of the sort buttons
    Sort(SortOrder),
    /// Slider moved
    ThumbSizeChanged(u32),
    /// Debounce timer for the slider fired
    ThumbSizeSettled(u64),
    /// Background thumbnail decode finished
    ThumbnailLoaded(ThumbKey, GalleryResult<Handle>),
    /// User clicked a thumbnail
    OpenViewer(usize),
    CloseViewer,
    ShowPrev,
    ShowNext,
    /// Background viewer decode finished for a gallery index
    PreviewLoaded(usize, GalleryResult<Handle>),
    WindowResized(Size),
    /// Swallows clicks that must not reach the widgets underneath
    Noop,
}

impl Pinsplorer {
    /// Create a new instance of the application
    fn new(settings: Settings, settings_path: Option<PathBuf>) -> (Self, Task<Message>) {
        let thumb_size = config::clamp_thumb_size(settings.thumb_size);
        let last_folder = settings.last_folder.clone();

        let mut app = Pinsplorer {
            settings,
            settings_path,
            gallery: Gallery::default(),
            thumbnails: ThumbnailCache::new(thumb_size),
            decode_permits: Arc::new(Semaphore::new(imaging::MAX_CONCURRENT_DECODES)),
            thumb_size,
            resize_debounce: Debounce::default(),
            viewer: None,
            picture: Picture::default(),
            window_size: WINDOW_SIZE,
            notice: None,
        };

        log::info!("🎨 Pinsplorer started with {}px thumbnails", thumb_size);

        // Reopen the previous folder if it is still around
        let task = match last_folder {
            Some(folder) if folder.is_dir() => app.open_folder(folder),
            _ => Task::none(),
        };

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectFolder => {
                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Select Folder with Images")
                    .pick_folder();

                match folder {
                    Some(folder) => self.open_folder(folder),
                    None => Task::none(),
                }
            }
            Message::Randomize => {
                self.gallery.shuffle(&mut rand::thread_rng());
                log::debug!("Shuffled {} images", self.gallery.len());
                Task::none()
            }
            Message::Sort(order) => {
                self.gallery.sort(order);
                Task::none()
            }
            Message::ThumbSizeChanged(size) => {
                self.thumb_size = config::clamp_thumb_size(size);
                let generation = self.resize_debounce.bump();

                Task::perform(
                    async { tokio::time::sleep(RESIZE_DEBOUNCE).await },
                    move |_| Message::ThumbSizeSettled(generation),
                )
            }
            Message::ThumbSizeSettled(generation) => {
                if !self.resize_debounce.is_current(generation)
                    || self.thumb_size == self.thumbnails.size()
                {
                    return Task::none();
                }

                log::info!("📐 Thumbnail size set to {}px", self.thumb_size);
                self.settings.thumb_size = self.thumb_size;
                self.save_settings();
                self.rebuild_thumbnails()
            }
            Message::ThumbnailLoaded(key, result) => {
                if let Err(e) = &result {
                    log::warn!("⚠️  Failed to load thumbnail: {}", e);
                }
                self.thumbnails.complete(&key, result);
                Task::none()
            }
            Message::OpenViewer(index) => match ViewerState::open(index, self.gallery.len()) {
                Some(viewer) => {
                    self.viewer = Some(viewer);
                    self.load_picture()
                }
                None => Task::none(),
            },
            Message::CloseViewer => {
                self.viewer = None;
                self.picture = Picture::default();
                Task::none()
            }
            Message::ShowPrev => {
                if self.viewer.as_mut().is_some_and(|viewer| viewer.prev()) {
                    self.load_picture()
                } else {
                    Task::none()
                }
            }
            Message::ShowNext => {
                if self.viewer.as_mut().is_some_and(|viewer| viewer.next()) {
                    self.load_picture()
                } else {
                    Task::none()
                }
            }
            Message::PreviewLoaded(index, result) => {
                // Drop results for an image the user already navigated away from
                if self.viewer.map(|v| v.index()) != Some(index) {
                    return Task::none();
                }

                self.picture = match result {
                    Ok(handle) => Picture::Ready(handle),
                    Err(e) => {
                        log::warn!("⚠️  Failed to load image: {}", e);
                        Picture::Failed(e.to_string())
                    }
                };
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_size = size;
                Task::none()
            }
            Message::Noop => Task::none(),
        }
    }

    /// Replace the gallery with the images in `folder` and start decoding
    /// their thumbnails
    fn open_folder(&mut self, folder: PathBuf) -> Task<Message> {
        match self.gallery.open(&folder) {
            Ok(()) => {
                log::info!(
                    "📁 Opened {} ({} images)",
                    folder.display(),
                    self.gallery.len()
                );
                self.notice = None;
                self.viewer = None;
                self.settings.last_folder = Some(folder);
                self.save_settings();
                self.rebuild_thumbnails()
            }
            Err(e) => {
                log::error!("❌ {}", e);
                self.notice = Some(format!("⚠️  {}", e));
                Task::none()
            }
        }
    }

    /// Reset the cache at the current size and queue one decode per image
    fn rebuild_thumbnails(&mut self) -> Task<Message> {
        let keys = self
            .thumbnails
            .rebuild(self.thumb_size, self.gallery.images());

        Task::batch(keys.into_iter().map(|key| {
            Task::perform(
                imaging::thumbnail::load_thumbnail(key, self.decode_permits.clone()),
                |(key, result)| Message::ThumbnailLoaded(key, result),
            )
        }))
    }

    /// Decode the viewer's current image to fit the window
    fn load_picture(&mut self) -> Task<Message> {
        let Some(viewer) = self.viewer else {
            return Task::none();
        };
        let Some(path) = self.gallery.get(viewer.index()).cloned() else {
            return Task::none();
        };

        self.picture = Picture::Loading;

        let max_width = self.window_size.width.max(1.0) as u32;
        let max_height = (self.window_size.height - ui::viewer::NAV_BAR_HEIGHT).max(1.0) as u32;

        Task::perform(
            imaging::preview::load_preview(viewer.index(), path, max_width, max_height),
            |(index, result)| Message::PreviewLoaded(index, result),
        )
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save_to(path) {
            log::warn!("⚠️  {}", e);
        }
    }

    /// Status line with loading progress appended while thumbnails decode
    fn status_line(&self) -> String {
        let progress = self.thumbnails.progress();
        let mut line = match self.gallery.folder() {
            Some(folder) => format!("{} images in {}", self.gallery.len(), folder.display()),
            None => String::from("Select a folder to start."),
        };
        if let Some(notice) = &self.notice {
            line = format!("{} · {}", notice, line);
        }

        if !progress.is_done() {
            line.push_str(&format!(
                " · loading thumbnails {}/{}",
                progress.ready + progress.failed,
                progress.total
            ));
        }
        if progress.failed > 0 {
            line.push_str(&format!(" · {} could not be loaded", progress.failed));
        }
        line
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        if let Some(viewer) = self.viewer {
            let name = self
                .gallery
                .get(viewer.index())
                .and_then(|path| path.file_name())
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let caption = format!("{} ({}/{})", name, viewer.index() + 1, self.gallery.len());

            return ui::viewer::view(&self.picture, caption);
        }

        let toolbar = row![
            button("Select Folder").on_press(Message::SelectFolder),
            button("Randomize").on_press(Message::Randomize),
            button("Sort A-Z").on_press(Message::Sort(SortOrder::Ascending)),
            button("Sort Z-A").on_press(Message::Sort(SortOrder::Descending)),
            text("Thumbnail Size"),
            slider(
                MIN_THUMB_SIZE..=MAX_THUMB_SIZE,
                self.thumb_size,
                Message::ThumbSizeChanged
            )
            .width(Length::Fixed(200.0)),
            text(format!("{}px", self.thumb_size)),
        ]
        .spacing(10)
        .padding(10)
        .align_y(Alignment::Center);

        let grid = responsive(move |size| {
            scrollable(ui::grid::view(
                self.gallery.images(),
                &self.thumbnails,
                size.width,
            ))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
        });

        column![
            toolbar,
            text(self.status_line()).size(14),
            grid,
        ]
        .spacing(6)
        .into()
    }

    /// Keyboard shortcuts only apply while the viewer is open
    fn subscription(&self) -> Subscription<Message> {
        let resize = window::resize_events().map(|(_id, size)| Message::WindowResized(size));

        if self.viewer.is_some() {
            Subscription::batch([resize, keyboard::on_key_press(viewer_key)])
        } else {
            resize
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn viewer_key(key: Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key {
        Key::Named(Named::Escape) => Some(Message::CloseViewer),
        Key::Named(Named::ArrowLeft) => Some(Message::ShowPrev),
        Key::Named(Named::ArrowRight) => Some(Message::ShowNext),
        _ => None,
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = Settings::default_path();
    let settings = match &settings_path {
        Some(path) => Settings::load_from(path),
        None => {
            log::warn!("No config directory available, settings will not be saved");
            Settings::default()
        }
    };

    iced::application("Pinsplorer", Pinsplorer::update, Pinsplorer::view)
        .theme(Pinsplorer::theme)
        .subscription(Pinsplorer::subscription)
        .window_size(WINDOW_SIZE)
        .centered()
        .run_with(move || Pinsplorer::new(settings, settings_path))
}
