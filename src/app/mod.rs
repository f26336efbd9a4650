use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use anyhow::Result;
use eframe::egui::{self, Context};
use rand::rngs::SmallRng;
use tracing::{error, info};

use crate::config::UniverseConfig;
use crate::content::{CountryBoxes, Language, WordCatalog, WordId, load_word_catalog};
use crate::layout::{GridAllocation, GridAllocator};

mod analytics;
mod focus;
mod relations;
mod render_utils;
mod ui;
mod universe;
mod viewport;

pub use self::relations::RelationConfig;
pub use self::viewport::ViewportConfig;

use self::analytics::{ViewDurationTracker, ViewRecord};
use self::focus::FocusResolver;
use self::relations::{RelationKind, RelationRenderer, RelationTarget};
use self::ui::PanelTransition;
use self::viewport::ViewportState;

pub struct WordUniverseApp {
    config: UniverseConfig,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<LoadedUniverse, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

/// Catalog plus its grid layout, built off the UI thread.
struct LoadedUniverse {
    catalog: WordCatalog,
    allocation: GridAllocation,
}

struct ViewModel {
    config: UniverseConfig,
    catalog: WordCatalog,
    allocation: GridAllocation,
    language: Language,
    viewport: ViewportState,
    focus: FocusResolver,
    relations: RelationRenderer,
    relation_targets: Vec<RelationTarget>,
    hovered_relation: Option<(WordId, RelationKind)>,
    view_tracker: ViewDurationTracker,
    last_view: Option<ViewRecord>,
    search: String,
    search_cache: Option<SearchCache>,
    year_cutoff: usize,
    show_details: bool,
    details_transition: PanelTransition,
    focus_scan_requested: bool,
    random: SmallRng,
}

struct SearchCache {
    query: String,
    results: Vec<WordId>,
}

impl WordUniverseApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: UniverseConfig) -> Self {
        let state = Self::start_load(&config);
        Self { config, state }
    }

    fn spawn_load(config: UniverseConfig) -> Receiver<Result<LoadedUniverse, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_universe(&config).map_err(|error| {
                error!(error = %format!("{error:#}"), "failed to load universe");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(config: &UniverseConfig) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(config.clone()),
        }
    }
}

fn load_universe(config: &UniverseConfig) -> Result<LoadedUniverse> {
    let started = Instant::now();
    let catalog = load_word_catalog(&config.content_path)?;
    let boxes = CountryBoxes::builtin();
    let allocation =
        GridAllocator::new(config.grid, &boxes, config.layout_seed).allocate(catalog.words());

    info!(
        placed = allocation.len(),
        dropped = allocation.dropped.len(),
        seed = config.layout_seed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "grid layout complete"
    );
    Ok(LoadedUniverse {
        catalog,
        allocation,
    })
}

impl eframe::App for WordUniverseApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(match result {
                            Ok(loaded) => AppState::Ready(Box::new(ViewModel::new(
                                self.config.clone(),
                                loaded,
                            ))),
                            Err(error) => AppState::Error(error),
                        });
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading word universe...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the word universe");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(&self.config));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
