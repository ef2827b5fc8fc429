//! Session wiring: mounts the page model against the engine components and
//! dispatches input events to them.
//!
//! Mount order mirrors the page: restore preferences, classify the
//! connection once, observe every deferred image, attach hover predictions
//! to nav items, cards and the résumé link, then run an initial pass at
//! scroll 0. After that everything is event-driven.

mod event;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub use event::{Event, EventTrace};

use crate::config::PagewarmConfig;
use crate::connection::{self, ConnectionInfo};
use crate::deferred::DeferredImage;
use crate::geometry::Viewport;
use crate::hover::{HoverHandle, HoverRegistry};
use crate::lazy::{Activation, LazyLoader};
use crate::manifest::PageManifest;
use crate::prefs::{PrefStore, QualityTier};
use crate::reveal::RevealObserver;
use crate::scroll::ScrollTracker;
use crate::warm::{Fetcher, Preloader};

/// Hover target for the résumé download link.
pub const RESUME_TARGET: &str = "link/resume";

/// Observable outcome of a session (or a replayed trace).
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Every URL actually fetched, in issue order.
    pub fetched: Vec<String>,
    /// Lazy activations in the order they happened.
    pub activations: Vec<Activation>,
    pub active_section: Option<String>,
    pub revealed: Vec<String>,
    pub dark_mode: bool,
    pub image_quality: QualityTier,
}

pub struct Session {
    manifest: Rc<PageManifest>,
    prefs: PrefStore,
    /// Tier decided at mount, shared with the hover closures.
    tier: Rc<Cell<QualityTier>>,
    preloader: Rc<RefCell<Preloader>>,
    hover: HoverRegistry,
    hover_handles: Vec<HoverHandle>,
    lazy: LazyLoader,
    tracker: ScrollTracker,
    reveal: RevealObserver,
    viewport: Viewport,
    activations: Vec<Activation>,
    expanded_card: Option<String>,
    mounted: bool,
}

impl Session {
    pub fn mount(
        manifest: PageManifest,
        mut prefs: PrefStore,
        conn: Option<&ConnectionInfo>,
        fetcher: Box<dyn Fetcher>,
        cfg: &PagewarmConfig,
    ) -> Self {
        let manifest = Rc::new(manifest);

        // Connection classification runs exactly once, at mount.
        let tier = connection::apply(conn, &mut prefs);
        let tier = Rc::new(Cell::new(tier));

        let mut session = Self {
            tracker: ScrollTracker::from_manifest(&manifest, cfg.scroll_probe_offset),
            lazy: LazyLoader::new(cfg.lazy_margin),
            reveal: RevealObserver::new(cfg.reveal_threshold, cfg.reveal_bottom_margin),
            preloader: Rc::new(RefCell::new(Preloader::new(fetcher))),
            hover: HoverRegistry::new(),
            hover_handles: Vec::new(),
            viewport: Viewport::new(0.0, cfg.viewport_height),
            manifest,
            prefs,
            tier,
            activations: Vec::new(),
            expanded_card: None,
            mounted: true,
        };

        session.observe_images();
        session.observe_reveals();
        session.register_hover_targets();
        // Initial pass before any input: above-the-fold images load now.
        session.scroll_to(0.0);
        session
    }

    fn observe_images(&mut self) {
        for image in self.manifest.images() {
            self.lazy.observe(DeferredImage::from_manifest(image));
        }
    }

    fn observe_reveals(&mut self) {
        for section in self.manifest.sections.iter().filter(|s| s.reveal) {
            self.reveal.observe(&section.id, section.rect());
        }
    }

    /// Nav items warm their whole section, cards warm both variants of
    /// their images, the résumé link warms the external PDF.
    fn register_hover_targets(&mut self) {
        for section_id in &self.manifest.nav.sections {
            let target = format!("nav/{section_id}");
            let manifest = Rc::clone(&self.manifest);
            let preloader = Rc::clone(&self.preloader);
            let tier = Rc::clone(&self.tier);
            let section_id = section_id.clone();
            let handle = self.hover.register(target, move || {
                if let Some(section) = manifest.section(&section_id) {
                    preloader.borrow_mut().preload_section(section, tier.get());
                }
            });
            self.hover_handles.push(handle);
        }

        for section in &self.manifest.sections {
            for card in &section.cards {
                let srcs: Vec<String> = card
                    .images
                    .iter()
                    .filter_map(|id| self.manifest.image(id))
                    .flat_map(|img| {
                        std::iter::once(img.src.clone()).chain(img.low_src.clone())
                    })
                    .collect();
                let preloader = Rc::clone(&self.preloader);
                let handle = self.hover.register(card.id.clone(), move || {
                    let mut preloader = preloader.borrow_mut();
                    for src in &srcs {
                        preloader.preload_image(src);
                    }
                });
                self.hover_handles.push(handle);
            }
        }

        if let Some(resume_url) = self.manifest.page.resume_url.clone() {
            let preloader = Rc::clone(&self.preloader);
            let handle = self.hover.register(RESUME_TARGET, move || {
                preloader.borrow_mut().preload_image(&resume_url);
            });
            self.hover_handles.push(handle);
        }
    }

    /// Dispatch one input event. Events after unmount are dropped.
    pub fn handle(&mut self, event: Event) {
        if !self.mounted {
            tracing::trace!("event after unmount dropped: {event:?}");
            return;
        }
        match event {
            Event::PointerEnter { target } => {
                self.hover.pointer_enter(&target);
            }
            Event::Scroll { y } => self.scroll_to(y),
            Event::ToggleDarkMode => {
                let next = !self.prefs.dark_mode();
                self.prefs.set_dark_mode(next);
            }
            Event::ExpandCard { target } => self.expand_card(&target),
            Event::CollapseCard => {
                self.expanded_card = None;
            }
        }
    }

    fn scroll_to(&mut self, y: f64) {
        self.viewport.scroll_y = y;
        let tier = self.tier.get();

        let activations = self.lazy.tick(&self.viewport, tier);
        for activation in &activations {
            // The activation fetch funnels through the preloader, so a
            // hover-warmed source costs nothing here.
            self.preloader.borrow_mut().preload_image(&activation.src);
        }
        self.activations.extend(activations);

        self.tracker.on_scroll(&self.manifest, &self.viewport);
        self.reveal.tick(&self.viewport);
    }

    fn expand_card(&mut self, target: &str) {
        let Some((section_id, image_ids)) = self
            .manifest
            .card(target)
            .map(|(s, c)| (s.id.clone(), c.images.clone()))
        else {
            tracing::debug!("expand for unknown card {target}");
            return;
        };
        self.expanded_card = Some(target.to_string());

        // The expanded detail re-renders the section's images; re-observing
        // is safe because activated ids never re-enter the watch set.
        for id in &image_ids {
            if let Some(image) = self.manifest.image(id) {
                self.lazy.observe(DeferredImage::from_manifest(image));
            }
        }
        tracing::debug!("card {target} expanded in section {section_id}");
        // Re-run the intersection pass for the remounted subtree.
        self.scroll_to(self.viewport.scroll_y);
    }

    pub fn expanded_card(&self) -> Option<&str> {
        self.expanded_card.as_deref()
    }

    pub fn active_section(&self) -> Option<&str> {
        self.tracker.active()
    }

    pub fn prefs(&self) -> &PrefStore {
        &self.prefs
    }

    /// Replay a recorded trace against this session.
    pub fn replay(&mut self, trace: &EventTrace) {
        for event in &trace.events {
            self.handle(event.clone());
        }
    }

    /// Tear down listeners and watchers. Future events are dropped; fetches
    /// already issued are not cancelled.
    pub fn unmount(&mut self) {
        for handle in self.hover_handles.drain(..) {
            self.hover.unregister(handle);
        }
        self.lazy.clear();
        self.mounted = false;
    }

    pub fn report(&self) -> SessionReport {
        let mut revealed: Vec<String> = self.reveal.revealed().map(str::to_string).collect();
        revealed.sort();
        SessionReport {
            fetched: self.preloader.borrow().issued_in_order().to_vec(),
            activations: self.activations.clone(),
            active_section: self.tracker.active().map(str::to_string),
            revealed,
            dark_mode: self.prefs.dark_mode(),
            image_quality: self.prefs.image_quality(),
        }
    }
}
