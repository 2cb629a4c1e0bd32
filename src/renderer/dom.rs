//! DOM backend: one absolutely-positioned div per obstacle segment
//!
//! Expects the page to provide `#game-board`, `#bird` and the HUD/screen
//! elements listed in `Hud`.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::sprites::{SpriteCanvas, SpriteSync};
use super::view::{FrameView, ObstacleView};
use crate::highscores::HighScore;
use crate::sim::{GameEvent, GamePhase};

fn html(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn set_style(el: &HtmlElement, name: &str, value: &str) {
    let _ = el.style().set_property(name, value);
}

fn set_text(el: &Option<HtmlElement>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}

fn set_visible(el: &Option<HtmlElement>, visible: bool) {
    if let Some(el) = el {
        set_style(el, "display", if visible { "flex" } else { "none" });
    }
}

/// Top and bottom segment elements for one obstacle
pub struct PipePair {
    top: HtmlElement,
    bottom: HtmlElement,
}

/// Creates pipe elements inside the board
pub struct DomCanvas {
    document: Document,
    board: Element,
}

impl DomCanvas {
    fn segment(&self, class: &str) -> Option<HtmlElement> {
        let el = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        el.set_class_name(class);
        self.board.append_child(&el).ok()?;
        Some(el)
    }
}

impl SpriteCanvas for DomCanvas {
    type Handle = PipePair;

    fn create(&mut self, obstacle: &ObstacleView) -> Option<PipePair> {
        let top = self.segment("pipe pipe-top")?;
        let Some(bottom) = self.segment("pipe pipe-bottom") else {
            top.remove();
            return None;
        };
        let pair = PipePair { top, bottom };
        self.update(&pair, obstacle);
        Some(pair)
    }

    /// Position and heights every frame; a resize changes `bottom_height`
    fn update(&mut self, pair: &PipePair, obstacle: &ObstacleView) {
        let left = format!("{}px", obstacle.x);
        set_style(&pair.top, "left", &left);
        set_style(&pair.bottom, "left", &left);
        set_style(&pair.top, "height", &format!("{}px", obstacle.top_height));
        set_style(&pair.bottom, "height", &format!("{}px", obstacle.bottom_height));
    }

    fn remove(&mut self, pair: PipePair) {
        pair.top.remove();
        pair.bottom.remove();
    }
}

/// Text fields and overlay screens
struct Hud {
    score: Option<HtmlElement>,
    level: Option<HtmlElement>,
    high_score: Option<HtmlElement>,
    /// Optional "Best 23 · level 5 · 3 days ago" line
    best_record: Option<HtmlElement>,
    final_score: Option<HtmlElement>,
    final_high_score: Option<HtmlElement>,
    start_screen: Option<HtmlElement>,
    pause_screen: Option<HtmlElement>,
    game_over_screen: Option<HtmlElement>,
}

impl Hud {
    fn find(document: &Document) -> Self {
        Self {
            score: html(document, "score-display"),
            level: html(document, "level-display"),
            high_score: html(document, "high-score-display"),
            best_record: html(document, "best-record"),
            final_score: html(document, "final-score"),
            final_high_score: html(document, "final-high-score"),
            start_screen: html(document, "start-screen"),
            pause_screen: html(document, "pause-screen"),
            game_over_screen: html(document, "game-over"),
        }
    }

    fn show_phase(&self, phase: GamePhase) {
        set_visible(&self.start_screen, phase == GamePhase::Idle);
        set_visible(&self.pause_screen, phase == GamePhase::Paused);
        set_visible(&self.game_over_screen, phase == GamePhase::GameOver);
    }
}

/// Draws a `FrameView` into the page
pub struct DomRenderer {
    board: Element,
    actor: Option<HtmlElement>,
    canvas: DomCanvas,
    sprites: SpriteSync<PipePair>,
    hud: Hud,
}

impl DomRenderer {
    /// Bind to the page; None if the board element is missing
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let board = document.get_element_by_id("game-board")?;
        let actor = html(&document, "bird");
        let hud = Hud::find(&document);
        hud.show_phase(GamePhase::Idle);

        Some(Self {
            board: board.clone(),
            actor,
            canvas: DomCanvas { document, board },
            sprites: SpriteSync::new(),
            hud,
        })
    }

    /// Board size in CSS pixels
    pub fn board_size(&self) -> (f32, f32) {
        (self.board.client_width() as f32, self.board.client_height() as f32)
    }

    /// Actor element size in CSS pixels, if present and laid out
    pub fn actor_size(&self) -> Option<(f32, f32)> {
        let actor = self.actor.as_ref()?;
        let (w, h) = (actor.offset_width(), actor.offset_height());
        (w > 0 && h > 0).then_some((w as f32, h as f32))
    }

    /// Remove every obstacle element right away
    pub fn clear_obstacles(&mut self) {
        self.sprites.clear(&mut self.canvas);
    }

    /// Position the actor and obstacles
    pub fn render(&mut self, frame: &FrameView) {
        if let Some(actor) = &self.actor {
            let transform = format!(
                "translateY({}px) rotate({}deg)",
                frame.actor.y, frame.actor.rotation_deg
            );
            set_style(actor, "transform", &transform);
        }
        self.sprites.sync(&mut self.canvas, &frame.obstacles);
    }

    /// Update HUD text and screens for a notification
    pub fn apply_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::ScoreChanged(score) => set_text(&self.hud.score, &score.to_string()),
            GameEvent::LevelChanged(level) => {
                set_text(&self.hud.level, &format!("LEVEL {}", level))
            }
            GameEvent::Reset => self.clear_obstacles(),
            GameEvent::PhaseChanged(phase) => self.hud.show_phase(phase),
            GameEvent::NewHighScore(value) => set_text(&self.hud.high_score, &value.to_string()),
            GameEvent::GameOver {
                final_score,
                high_score,
            } => {
                set_text(&self.hud.final_score, &final_score.to_string());
                set_text(&self.hud.final_high_score, &high_score.to_string());
                set_text(&self.hud.high_score, &high_score.to_string());
            }
            GameEvent::PassThrough | GameEvent::Jumped => {}
        }
    }

    /// Show the stored best record
    ///
    /// The summary goes to `#best-record` when the page has one and to the
    /// score display's tooltip either way.
    pub fn show_record(&self, record: &HighScore, now_ms: f64) {
        let summary = record.summary(now_ms);
        set_text(&self.hud.high_score, &record.score.to_string());
        set_text(&self.hud.best_record, &summary);
        if let Some(el) = &self.hud.high_score {
            let _ = el.set_attribute("title", &summary);
        }
    }
}
