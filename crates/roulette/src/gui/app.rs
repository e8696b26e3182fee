use crate::config;
use crate::events::AppEvent;
use crate::gui::surface::CairoSurface;
use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use roulette_core::{Point, Response, Roulette, Schedule};
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub roulette: Rc<RefCell<Roulette>>,
    pub drawing_area: gtk::DrawingArea,
    /// Committed value as shown on the closed widget.
    pub value: String,
    pub open: bool,
    pub size: i32,
    pub title: String,
    pub gtk_theme: bool,
}

#[derive(Debug)]
pub enum AppMsg {
    Activate,
    Open,
    Close,
    Toggle,
    PointerMove(Point),
    Press(Point),
    Release(Point),
    Tick(u64),
    QueryValue(async_channel::Sender<String>),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Open => AppMsg::Open,
            AppEvent::Close => AppMsg::Close,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::Query(reply) => AppMsg::QueryValue(reply),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Roulette, bool, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Roulette"),
            set_resizable: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 6,
                set_margin_all: 12,

                gtk::Label {
                    #[watch]
                    set_label: &model.title,
                    #[watch]
                    set_visible: !model.title.is_empty(),
                },

                gtk::Button {
                    add_css_class: "roulette-value",
                    #[watch]
                    set_label: &model.value,
                    #[watch]
                    set_visible: !model.open,
                    connect_clicked => AppMsg::Activate,
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    add_css_class: "roulette-wheel",
                    #[watch]
                    set_content_width: model.size,
                    #[watch]
                    set_content_height: model.size,
                    #[watch]
                    set_visible: model.open,

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::PointerMove(Point::new(x, y)));
                        }
                    },

                    add_controller = gtk::GestureClick {
                        set_button: gtk::gdk::BUTTON_PRIMARY,
                        connect_pressed[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Press(Point::new(x, y)));
                        },
                        connect_released[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Release(Point::new(x, y)));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (roulette, gtk_theme, rx) = init;

        theme::load_css();

        let mut model = AppModel {
            roulette: Rc::new(RefCell::new(roulette)),
            drawing_area: gtk::DrawingArea::default(),
            value: String::new(),
            open: false,
            size: 0,
            title: String::new(),
            gtk_theme,
        };
        model.sync();

        let widgets = view_output!();
        model.drawing_area = widgets.drawing_area.clone();
        model.apply_theme();

        let roulette = model.roulette.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let mut surface = CairoSurface::new(cr, width, height);
                if let Err(e) = roulette.borrow().draw(&mut surface) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let response = match msg {
            AppMsg::Activate => Ok(self.roulette.borrow_mut().activate()),
            AppMsg::Open => Ok(self.roulette.borrow_mut().open()),
            AppMsg::Close => Ok(self.roulette.borrow_mut().close()),
            AppMsg::Toggle => {
                let mut roulette = self.roulette.borrow_mut();
                Ok(if roulette.is_open() {
                    roulette.close()
                } else {
                    roulette.open()
                })
            }
            AppMsg::PointerMove(at) => self.roulette.borrow_mut().pointer_moved(at),
            AppMsg::Press(at) => self.roulette.borrow_mut().pressed(at),
            AppMsg::Release(at) => self.roulette.borrow_mut().released(at),
            AppMsg::Tick(epoch) => self.roulette.borrow_mut().tick(epoch),
            AppMsg::QueryValue(reply) => {
                if let Err(e) = reply.try_send(self.value.clone()) {
                    log::warn!("Failed to answer value query: {}", e);
                }
                return;
            }
            AppMsg::ConfigReload => {
                self.reload();
                Ok(Response::redraw())
            }
        };

        match response {
            Ok(response) => self.apply(response, &sender),
            Err(e) => log::error!("Roulette error: {}", e),
        }
        self.sync();
    }
}

impl AppModel {
    fn sync(&mut self) {
        let roulette = self.roulette.borrow();
        self.value = roulette.value().as_str().to_string();
        self.open = roulette.is_open();
        self.size = roulette.size().round() as i32;
        self.title = roulette.label().unwrap_or_default().to_string();
    }

    fn apply(&self, response: Response, sender: &ComponentSender<Self>) {
        if response.redraw {
            self.drawing_area.queue_draw();
        }
        match response.schedule {
            Some(Schedule::NextFrame { epoch }) => {
                let sender = sender.clone();
                self.drawing_area.add_tick_callback(move |_, _| {
                    sender.input(AppMsg::Tick(epoch));
                    glib::ControlFlow::Break
                });
            }
            Some(Schedule::After { delay, epoch }) => {
                let sender = sender.clone();
                glib::timeout_add_local_once(delay, move || {
                    sender.input(AppMsg::Tick(epoch));
                });
            }
            None => {}
        }
    }

    fn apply_theme(&self) {
        if !self.gtk_theme {
            return;
        }
        let mut roulette = self.roulette.borrow_mut();
        let colors =
            theme::colors_from_context(&self.drawing_area.style_context(), roulette.colors());
        roulette.set_colors(colors);
    }

    fn reload(&mut self) {
        let config = match config::load_config() {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };
        match config::build_roulette(&config) {
            Ok(roulette) => {
                *self.roulette.borrow_mut() = roulette;
                self.gtk_theme = config.gtk_theme;
                self.apply_theme();
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Ignoring invalid config: {}", e),
        }
    }
}
