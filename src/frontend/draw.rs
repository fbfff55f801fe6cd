use macroquad::prelude::*;

use gold_snake::highscore::HighScoreTable;
use gold_snake::view::{RunEnd, RunSummary, RunView, Screen};
use gold_snake::{Cell, GridSize};

// Matrix-style palette
const MATRIX_HEAD: Color = Color::new(0.64, 1.0, 0.64, 1.0);
const MATRIX_BODY: Color = Color::new(0.25, 0.9, 0.25, 1.0);
const MATRIX_DIM: Color = Color::new(0.08, 0.4, 0.08, 1.0);
const MATRIX_FOOD: Color = Color::new(1.0, 0.3, 0.3, 1.0);
const GOLD: Color = Color::new(1.0, 0.84, 0.0, 1.0);
const RAIN: Color = Color::new(0.2, 0.8, 0.2, 0.5);

const EXPLOSION_COLORS: [Color; 5] = [
    Color::new(1.0, 0.55, 0.0, 1.0),
    Color::new(1.0, 0.0, 0.0, 1.0),
    Color::new(0.2, 0.2, 0.2, 1.0),
    Color::new(0.7, 0.7, 0.7, 1.0),
    Color::new(0.0, 0.0, 0.0, 1.0),
];

const MATRIX_GLYPHS: &[u8] = b"01<>[]{}()/\\|-=+*;:.,^~ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn random_matrix_char() -> char {
    let idx = macroquad::rand::gen_range(0, MATRIX_GLYPHS.len());
    MATRIX_GLYPHS[idx] as char
}

fn matrix_char_for_cell(c: Cell) -> char {
    let hx = (c.x as i64).wrapping_mul(73_856_093);
    let hy = (c.y as i64).wrapping_mul(19_349_663);
    let h = (hx ^ hy).unsigned_abs() as usize;
    MATRIX_GLYPHS[h % MATRIX_GLYPHS.len()] as char
}

/// Where the grid sits on screen.
#[derive(Copy, Clone)]
struct Layout {
    tile_w: f32,
    tile_h: f32,
    off_x: f32,
    off_y: f32,
}

impl Layout {
    fn fit(grid: GridSize) -> Self {
        let sw = screen_width();
        let sh = screen_height();
        let tile_w = sw / grid.width as f32;
        let tile_h = sh / grid.height as f32;
        let off_x = (sw - tile_w * grid.width as f32) * 0.5;
        let off_y = (sh - tile_h * grid.height as f32) * 0.5;
        Self { tile_w, tile_h, off_x, off_y }
    }

    fn glyph(&self, ch: char, cell: Cell, color: Color) {
        let x = self.off_x + (cell.x as f32) * self.tile_w + 1.0;
        let y = self.off_y + ((cell.y as f32 + 1.0) * self.tile_h) - 1.0; // baseline
        let size = self.tile_w.min(self.tile_h).max(6.0);
        let params = TextParams { font_size: size as u16, font_scale: 1.0, font_scale_aspect: 1.0, color, ..Default::default() };
        draw_text_ex(&ch.to_string(), x, y, params);
    }

    fn tile(&self, cell: Cell, color: Color) {
        let x = self.off_x + cell.x as f32 * self.tile_w;
        let y = self.off_y + cell.y as f32 * self.tile_h;
        draw_rectangle(x, y, self.tile_w, self.tile_h, color);
    }
}

#[derive(Clone, Copy)]
struct RainDrop {
    x: i32,
    y: f32,
    speed: f32,
}

/// Falling glyph columns behind everything else.
pub struct Backdrop {
    grid: GridSize,
    drops: Vec<RainDrop>,
}

impl Backdrop {
    pub fn new(grid: GridSize) -> Self {
        let drops = (0..(grid.width / 2))
            .map(|i| RainDrop {
                x: (i * 2) % grid.width,
                y: macroquad::rand::gen_range(0, grid.height) as f32,
                speed: macroquad::rand::gen_range(6.0, 18.0),
            })
            .collect();
        Self { grid, drops }
    }

    pub fn draw(&mut self, dt: f32) {
        let layout = Layout::fit(self.grid);
        for d in self.drops.iter_mut() {
            d.y += d.speed * dt;
            if d.y >= self.grid.height as f32 {
                d.y = 0.0;
            }
            let cell = Cell::new(d.x.clamp(0, self.grid.width - 1), (d.y as i32).clamp(0, self.grid.height - 1));
            layout.glyph(random_matrix_char(), cell, RAIN);
        }
    }
}

fn centered(text: &str, y: f32, size: u16, color: Color) {
    let m = measure_text(text, None, size, 1.0);
    draw_text(text, (screen_width() - m.width) * 0.5, y, size as f32, color);
}

pub fn draw_screen(screen: &Screen<'_>, grid: GridSize, now: f64) {
    match screen {
        Screen::InitialsEntry { partial } => draw_initials(partial),
        Screen::Running(view) => draw_run(view, grid, now),
        Screen::HighScores { table, highlight, last_run } => draw_high_scores(table, *highlight, last_run),
        Screen::Exited => {}
    }
}

fn draw_initials(partial: &str) {
    let sh = screen_height();
    centered("Enter 3-letter initials:", sh * 0.33, 40, MATRIX_HEAD);
    centered(partial, sh * 0.33 + 60.0, 48, WHITE);
    centered("Enter: start   Esc: quit", sh * 0.33 + 110.0, 20, GRAY);
}

fn draw_run(view: &RunView<'_>, grid: GridSize, now: f64) {
    let layout = Layout::fit(grid);

    for (i, cell) in view.snake.cells().enumerate() {
        let color = if i == 0 { MATRIX_HEAD } else { MATRIX_BODY };
        layout.glyph(matrix_char_for_cell(cell), cell, color);
    }

    layout.glyph('@', view.food.cell, MATRIX_FOOD);

    if let Some(gold) = view.gold.filter(|g| !g.flashing) {
        layout.tile(gold.cell, Color::new(GOLD.r, GOLD.g, GOLD.b, 0.25 + 0.75 * gold.remaining_fraction as f32));
        layout.glyph('$', gold.cell, GOLD);
    }

    if let Some(explosion) = view.explosion {
        let step = (explosion.progress(now) * EXPLOSION_COLORS.len() as f64) as usize;
        let color = EXPLOSION_COLORS[step.min(EXPLOSION_COLORS.len() - 1)];
        for cell in &explosion.tiles {
            layout.tile(*cell, color);
        }
    }

    draw_text(&view.hud_line(), 8.0, 20.0, 24.0, WHITE);
}

fn draw_high_scores(table: &HighScoreTable, highlight: Option<usize>, last_run: &RunSummary) {
    let sh = screen_height();
    let headline = match last_run.end {
        RunEnd::SelfCollision => "YOU LOSE",
        RunEnd::HeadShot => "HEAD SHOT",
        RunEnd::Quit => "BYE",
    };
    centered(headline, sh * 0.12, 48, MATRIX_FOOD);
    if last_run.new_high_score {
        centered(&format!("NEW HIGH SCORE BY {} {}", last_run.initials, last_run.score), sh * 0.12 + 40.0, 28, GOLD);
    } else {
        centered(&format!("{} scored {}", last_run.initials, last_run.score), sh * 0.12 + 40.0, 28, WHITE);
    }

    let mut y = sh * 0.12 + 90.0;
    centered("TOP 10 HIGH SCORES", y, 24, MATRIX_HEAD);
    y += 34.0;
    for (i, entry) in table.entries().iter().enumerate() {
        let color = if highlight == Some(i) { GOLD } else { MATRIX_BODY };
        centered(&format!("{}. {} - {}", i + 1, entry.initials, entry.score), y, 24, color);
        y += 28.0;
    }

    centered("Enter: play again   Esc: quit", y + 20.0, 20, MATRIX_DIM);
}
