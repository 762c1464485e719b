//! Space Adventure entry point
//!
//! The browser build wires the DOM to the game and runs the frame loop. The
//! native build plays a scripted headless run and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, HtmlInputElement};

    use space_adventure::audio::AudioManager;
    use space_adventure::consts::*;
    use space_adventure::game::Game;
    use space_adventure::highscores::{HighScores, format_age};
    use space_adventure::persistence::JsonStore;
    use space_adventure::platform::canvas::Canvas2dSurface;
    use space_adventure::platform::storage::LocalStorage;
    use space_adventure::platform::{Control, InputState};
    use space_adventure::ranking::{AchievementSource, AchievementSummary, ListView, RankingSource};
    use space_adventure::renderer;
    use space_adventure::sim::{GameEvent, GamePhase, Playfield, PowerUpKind};
    use space_adventure::tuning::Tuning;
    use space_adventure::ui::{Notification, ranking_line};

    /// How long a toast stays up (ms)
    const TOAST_MS: f64 = 3000.0;

    /// Everything the page callbacks share
    struct App {
        game: Game<JsonStore<LocalStorage>>,
        input: InputState,
        surface: Canvas2dSurface,
        audio: AudioManager,
        high_scores: HighScores,
        scores_backend: LocalStorage,
        /// Table rank of the run that just ended
        last_rank: Option<usize>,
        accumulator: f32,
        last_time: f64,
        /// Phase the overlay currently reflects
        shown_phase: GamePhase,
        toasts: Vec<(Element, f64)>,
    }

    type Shared = Rc<RefCell<App>>;

    fn page_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    impl App {
        /// Run simulation steps for the elapsed frame time
        fn update(&mut self, dt: f32) {
            self.accumulator += dt.min(0.1);
            self.audio.set_enabled(self.game.progression().settings().sound);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.snapshot();
                let events = self.game.frame(&input, SIM_DT);
                self.audio.play_events(&events);
                for event in &events {
                    if let GameEvent::GameOver { score, level } = *event {
                        self.record_high_score(score, level);
                    }
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Button-driven actions between steps (power-ups, pause menu)
            let events = self.game.settle();
            self.audio.play_events(&events);
        }

        fn record_high_score(&mut self, score: u64, level: u32) {
            let name = self.game.progression().record().name.clone();
            if let Some(rank) = self
                .high_scores
                .add_score(&name, score, level, js_sys::Date::now())
            {
                log::info!("High score #{}: {}", rank, score);
                self.last_rank = Some(rank);
                if let Err(e) = self.high_scores.save(&mut self.scores_backend) {
                    log::warn!("Failed to save high scores: {}", e);
                }
            }
        }

        fn render(&mut self, time: f64) {
            renderer::render(self.game.state(), &mut self.surface, time);
        }

        /// Sync HUD, overlay and toasts with the game
        fn update_dom(&mut self, now: f64) {
            let Some(document) = page_document() else { return };

            let hud = self.game.hud();
            set_text(&document, "score", &hud.score.to_string());
            set_text(&document, "level", &hud.level.to_string());
            set_text(&document, "lives", &hud.lives_display());

            let phase = self.game.phase();
            if phase != self.shown_phase {
                self.show_overlay(&document, phase);
                if phase == GamePhase::GameOver {
                    self.render_lists(&document);
                }
                self.shown_phase = phase;
            }

            for notification in self.game.take_notifications() {
                if let Some(toast) = show_toast(&document, &notification) {
                    self.toasts.push((toast, now + TOAST_MS));
                }
            }
            self.toasts.retain(|(toast, expires)| {
                if now >= *expires {
                    toast.remove();
                    false
                } else {
                    true
                }
            });
        }

        fn show_overlay(&self, document: &Document, phase: GamePhase) {
            let Some(overlay) = document.get_element_by_id("gameOverlay") else {
                return;
            };
            match phase {
                GamePhase::Paused => {
                    set_text(document, "overlayTitle", "Game Paused");
                    set_text(document, "overlayMessage", "Take a break!");
                    let _ = overlay.class_list().remove_1("hidden");
                }
                GamePhase::GameOver => {
                    let session = &self.game.state().session;
                    let mut message =
                        format!("Score: {}<br>Level: {}", session.score, session.level);
                    if self.game.last_run().is_some_and(|run| run.new_best) {
                        message.push_str("<br><span style=\"color: #4facfe;\">New Best Score!</span>");
                    }
                    if let Some(rank) = self.last_rank {
                        message.push_str(&format!("<br>Rank #{} on this device", rank));
                    }
                    set_text(document, "overlayTitle", "Game Over");
                    if let Some(el) = document.get_element_by_id("overlayMessage") {
                        el.set_inner_html(&message);
                    }
                    let _ = overlay.class_list().remove_1("hidden");
                }
                GamePhase::Playing | GamePhase::Menu => {
                    let _ = overlay.class_list().add_1("hidden");
                }
            }
        }
    }

    impl App {
        /// Local leaderboard and achievement lists
        fn render_lists(&self, document: &Document) {
            let now = js_sys::Date::now();
            let scores = ListView::from_result(self.high_scores.rankings());
            let lines: Vec<String> = match &scores {
                ListView::Loaded(rows) => rows
                    .iter()
                    .zip(&self.high_scores.entries)
                    .enumerate()
                    .map(|(i, (row, entry))| {
                        format!("{} · {}", ranking_line(i + 1, row), format_age(now, entry.timestamp))
                    })
                    .collect(),
                _ => scores.placeholder("high scores").into_iter().collect(),
            };
            fill_list(document, "leaderboardList", &lines);

            let achievements = ListView::from_result(self.game.progression().achievements());
            let lines: Vec<String> = match &achievements {
                ListView::Loaded(list) => {
                    let summary = AchievementSummary::of(list);
                    set_text(
                        document,
                        "achievementProgress",
                        &format!("{}/{} ({}%)", summary.unlocked, summary.total, summary.percent),
                    );
                    list.iter()
                        .map(|a| {
                            let mark = if a.unlocked { "✅" } else { "🔒" };
                            format!("{} {}: {}", mark, a.name, a.description)
                        })
                        .collect()
                }
                _ => achievements.placeholder("achievements").into_iter().collect(),
            };
            fill_list(document, "achievementsList", &lines);
        }
    }

    /// Replace a container's children with one text row per line
    fn fill_list(document: &Document, id: &str, lines: &[String]) {
        let Some(list) = document.get_element_by_id(id) else { return };
        list.set_inner_html("");
        for line in lines {
            if let Ok(row) = document.create_element("div") {
                row.set_class_name("list-item");
                row.set_text_content(Some(line));
                let _ = list.append_child(&row);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_toast(document: &Document, notification: &Notification) -> Option<Element> {
        let toast = document.create_element("div").ok()?;
        toast.set_class_name(&format!("toast toast-{} show", notification.kind.as_str()));
        toast.set_text_content(Some(&notification.message));
        document.body()?.append_child(&toast).ok()?;
        Some(toast)
    }

    fn set_display(document: &Document, id: &str, display: &str) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Space Adventure starting...");

        let Some(document) = page_document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        // Fit the container, never wider than the playfield
        let container_width = canvas
            .parent_element()
            .map(|p| p.get_bounding_client_rect().width() as f32)
            .unwrap_or(PLAYFIELD_MAX_WIDTH);
        let playfield = Playfield::new(container_width - 20.0);
        canvas.set_width(playfield.width as u32);
        canvas.set_height(playfield.height as u32);

        let Some(surface) = Canvas2dSurface::new(&canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let scores_backend = LocalStorage::new();
        let app = Rc::new(RefCell::new(App {
            game: Game::new(
                seed,
                playfield,
                Tuning::default(),
                JsonStore::new(LocalStorage::new()),
            ),
            input: InputState::new(),
            surface,
            audio: AudioManager::new(),
            high_scores: HighScores::load(&scores_backend),
            scores_backend,
            last_rank: None,
            accumulator: 0.0,
            last_time: 0.0,
            shown_phase: GamePhase::Menu,
            toasts: Vec::new(),
        }));
        log::info!("Game initialized with seed: {}", seed);

        if let Some(input) = document
            .get_element_by_id("playerName")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let name = app.borrow().game.progression().record().name.clone();
            input.set_value(&name);
        }
        set_display(&document, "startModal", "flex");
        app.borrow().render_lists(&document);

        setup_keyboard(app.clone());
        setup_control_buttons(&document, app.clone());
        setup_menu_buttons(&document, app.clone());
        setup_power_up_buttons(&document, app.clone());
        setup_settings(&document, app.clone());
        setup_shop(&document, app.clone());

        request_animation_frame(app);
        log::info!("Space Adventure running!");
    }

    fn on<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(app: Shared) {
        let Some(document) = page_document() else { return };
        {
            let app = app.clone();
            on(&document, "keydown", move |event: web_sys::KeyboardEvent| {
                let code = event.code();
                let mut a = app.borrow_mut();
                if code == "Escape" {
                    a.game.toggle_pause();
                } else if a.input.key_down(&code) {
                    event.prevent_default();
                }
            });
        }
        on(&document, "keyup", move |event: web_sys::KeyboardEvent| {
            app.borrow_mut().input.key_up(&event.code());
        });
    }

    /// On-screen direction and fire buttons
    fn setup_control_buttons(document: &Document, app: Shared) {
        for id in ["leftBtn", "rightBtn", "upBtn", "downBtn", "shootBtn"] {
            let (Some(btn), Some(control)) = (document.get_element_by_id(id), Control::from_button_id(id))
            else {
                continue;
            };
            for press in ["touchstart", "mousedown"] {
                let app = app.clone();
                on(&btn, press, move |event: web_sys::Event| {
                    event.prevent_default();
                    app.borrow_mut().input.press(control);
                });
            }
            for release in ["touchend", "mouseup"] {
                let app = app.clone();
                on(&btn, release, move |event: web_sys::Event| {
                    event.prevent_default();
                    app.borrow_mut().input.release_all();
                });
            }
        }
    }

    fn setup_menu_buttons(document: &Document, app: Shared) {
        if let Some(btn) = document.get_element_by_id("startGameBtn") {
            let app = app.clone();
            on(&btn, "click", move |_event: web_sys::MouseEvent| {
                let Some(document) = page_document() else { return };
                let name = document
                    .get_element_by_id("playerName")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                if app.borrow_mut().game.start(&name) {
                    set_display(&document, "startModal", "none");
                }
            });
        }
        if let Some(btn) = document.get_element_by_id("pauseBtn") {
            let app = app.clone();
            on(&btn, "click", move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.toggle_pause();
            });
        }
        if let Some(btn) = document.get_element_by_id("resumeBtn") {
            let app = app.clone();
            on(&btn, "click", move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.resume();
            });
        }
        if let Some(btn) = document.get_element_by_id("restartBtn") {
            on(&btn, "click", move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let mut a = app.borrow_mut();
                a.input.release_all();
                a.last_rank = None;
                a.game.restart(seed);
            });
        }
    }

    fn setup_power_up_buttons(document: &Document, app: Shared) {
        let Ok(buttons) = document.query_selector_all(".powerup-btn") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(btn) = buttons
                .item(i)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let Some(kind) = btn
                .get_attribute("data-powerup")
                .and_then(|name| PowerUpKind::from_str(&name))
            else {
                log::warn!("Power-up button without a known data-powerup");
                continue;
            };
            let app = app.clone();
            on(&btn, "click", move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.use_power_up(kind);
            });
        }
    }

    /// Settings checkboxes, keyed by their label text
    fn setup_settings(document: &Document, app: Shared) {
        on(document, "change", move |event: web_sys::Event| {
            let Some(checkbox) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let label = checkbox
                .closest(".setting-item")
                .ok()
                .flatten()
                .and_then(|item| item.query_selector(".setting-info span").ok().flatten())
                .and_then(|span| span.text_content());
            if let Some(label) = label {
                app.borrow_mut()
                    .game
                    .progression_mut()
                    .update_setting(&label, checkbox.checked());
            }
        });
    }

    /// Buy and equip buttons inside `.inventory-item[data-item]` cards
    fn setup_shop(document: &Document, app: Shared) {
        on(document, "click", move |event: web_sys::MouseEvent| {
            let Some(button) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(ship) = button
                .closest(".inventory-item")
                .ok()
                .flatten()
                .and_then(|item| item.get_attribute("data-item"))
            else {
                return;
            };
            let classes = button.class_list();
            let mut a = app.borrow_mut();
            if classes.contains("buy-btn") {
                a.game.buy_ship(&ship);
            } else if classes.contains("equip-btn") {
                a.game.equip_ship(&ship);
            }
        });
    }

    fn request_animation_frame(app: Shared) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Shared, time: f64) {
        {
            let mut a = app.borrow_mut();
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt);
            a.render(time);
            a.update_dom(time);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use space_adventure::game::Game;
    use space_adventure::highscores::HighScores;
    use space_adventure::persistence::{JsonStore, MemoryStore};
    use space_adventure::renderer::{self, CommandBuffer};
    use space_adventure::sim::{GamePhase, Playfield, TickInput};
    use space_adventure::ranking::{AchievementSource, AchievementSummary, ListView, RankingSource};
    use space_adventure::ui::{ProfileView, format_number, ranking_line};
    use space_adventure::{Tuning, consts::SIM_DT};

    /// Two minutes of play at 60 Hz
    const DEMO_FRAMES: u64 = 60 * 120;

    env_logger::init();
    log::info!("Space Adventure (native) starting...");
    log::info!("Running a scripted headless demo; serve the wasm build to play");

    // Optional balance override: `space-adventure tuning.json`
    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let seed = 0x5eed;
    let mut game = Game::new(
        seed,
        Playfield::default(),
        tuning,
        JsonStore::new(MemoryStore::new()),
    );
    game.start("Autopilot");

    let mut surface = CommandBuffer::new();
    let mut frames = 0;
    while frames < DEMO_FRAMES && game.phase() == GamePhase::Playing {
        // Sweep left and right, firing every few frames
        let sweep_right = (frames / 90) % 2 == 0;
        let input = TickInput {
            left: !sweep_right,
            right: sweep_right,
            fire: frames % 8 == 0,
            ..Default::default()
        };
        game.frame(&input, SIM_DT);

        surface.clear();
        renderer::render(game.state(), &mut surface, frames as f64 * 1000.0 / 60.0);
        frames += 1;
    }

    for note in game.take_notifications() {
        log::info!("[{}] {}", note.kind.as_str(), note.message);
    }

    let session = &game.state().session;
    log::info!(
        "Demo ended after {} frames ({:?}): score {}, level {}, lives {}",
        frames,
        game.phase(),
        format_number(session.score),
        session.level,
        session.lives
    );
    log::info!("Last frame: {} draw commands", surface.commands.len());

    let mut table = HighScores::new();
    if let Some(rank) = table.add_score("Autopilot", session.score, session.level, 0.0) {
        log::info!("Local high score rank: {}", rank);
    }
    match ListView::from_result(table.rankings()) {
        ListView::Loaded(rows) => {
            for (i, row) in rows.iter().enumerate() {
                log::info!("{}", ranking_line(i + 1, row));
            }
        }
        view => log::info!("{}", view.placeholder("high scores").unwrap_or_default()),
    }

    if let Ok(list) = game.progression().achievements() {
        let summary = AchievementSummary::of(&list);
        log::info!(
            "Achievements: {}/{} ({}%)",
            summary.unlocked,
            summary.total,
            summary.percent
        );
    }

    let profile = ProfileView::from_record(game.progression().record());
    log::info!(
        "Profile {}: level {}, coins {}, best {}, games {}, play time {}",
        profile.name,
        profile.level,
        profile.coins,
        profile.best_score,
        profile.games_played,
        profile.play_time
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
