//! Act 4: discovery standards across scientific fields

use anyhow::Result;

use super::{Layout, PLAY_SECS, add_text, fade_out_scene};
use crate::domain::{Point, Role, palette};
use crate::encode::FrameSink;
use crate::scene::{Directive, ObjectId};
use crate::stage::Stage;

const TITLE: &str = "Scientific Standards for Discovery";
const HIGHLIGHT_NOTE: &str =
    "For extraordinary claims like new particle discovery,\na 5σ threshold is required";

/// Table header cells, left to right
pub const HEADERS: [&str; 4] = ["Field", "Standard", "Random Chance", "Application"];

/// One table row: field, sigma standard, odds of a random fluke, application
pub struct ExampleRow {
    pub field: &'static str,
    pub standard: &'static str,
    pub chance: &'static str,
    pub application: &'static str,
}

/// The four fields, physics first (it gets highlighted)
pub const ROWS: [ExampleRow; 4] = [
    ExampleRow {
        field: "Physics",
        standard: "5σ",
        chance: "1 in 3.5 million",
        application: "Particle discovery (Higgs Boson)",
    },
    ExampleRow {
        field: "Astronomy",
        standard: "3σ - 5σ",
        chance: "1 in 370 - 3.5 million",
        application: "New celestial object detection",
    },
    ExampleRow {
        field: "Medicine",
        standard: "2σ",
        chance: "1 in 20",
        application: "Clinical trial results",
    },
    ExampleRow {
        field: "Social Science",
        standard: "2σ",
        chance: "1 in 20",
        application: "Statistical hypothesis testing",
    },
];

/// Column center positions as fractions of the canvas width
const COLUMN_X: [f32; 4] = [0.14, 0.34, 0.55, 0.81];

fn cell_anchor(layout: &Layout, column: usize, row: usize) -> Point {
    // Row 0 is the header; data rows follow below it
    Point::new(
        layout.w * COLUMN_X[column],
        layout.h * (0.22 + row as f32 * 0.10),
    )
}

pub fn play<S: FrameSink>(stage: &mut Stage<S>) -> Result<()> {
    let layout = Layout::of(stage);

    let title_style = Role::SectionTitle.style();
    let (_, title_h) = stage.measure_text(TITLE, title_style);
    let title = add_text(stage, TITLE, title_style, layout.top_center(title_h));
    stage.play(&[Directive::Write(title)], PLAY_SECS)?;

    let header_style = Role::CellHeader.style();
    let cell_style = Role::Cell.style();

    let mut table = Vec::new();
    for (col, header) in HEADERS.iter().enumerate() {
        table.push(add_text(
            stage,
            header,
            header_style,
            cell_anchor(&layout, col, 0),
        ));
    }
    let mut physics_cells: Vec<ObjectId> = Vec::new();
    for (row_index, row) in ROWS.iter().enumerate() {
        let cells = [row.field, row.standard, row.chance, row.application];
        for (col, content) in cells.iter().enumerate() {
            let id = add_text(
                stage,
                content,
                cell_style,
                cell_anchor(&layout, col, row_index + 1),
            );
            if row_index == 0 {
                physics_cells.push(id);
            }
            table.push(id);
        }
    }

    let create_table: Vec<Directive> = table.iter().map(|&id| Directive::Write(id)).collect();
    stage.play(&create_table, 1.5)?;
    stage.wait(2.0)?;

    // Emphasize the 5-sigma standard by recoloring the physics row
    let highlight: Vec<Directive> = physics_cells
        .iter()
        .map(|&id| Directive::Recolor(id, palette::SIGMA_PURPLE))
        .collect();
    stage.play(&highlight, PLAY_SECS)?;

    let caption_style = Role::Caption.style();
    let (_, note_h) = stage.measure_text(HIGHLIGHT_NOTE, caption_style);
    let note = add_text(
        stage,
        HIGHLIGHT_NOTE,
        caption_style,
        layout.bottom_center(note_h),
    );
    stage.play(&[Directive::Write(note)], PLAY_SECS)?;
    stage.wait(2.0)?;

    fade_out_scene(stage, PLAY_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acts::tests::test_stage;

    #[test]
    fn test_table_is_four_by_four_with_literal_values() {
        assert_eq!(HEADERS.len(), 4);
        assert_eq!(ROWS.len(), 4);

        let physics = &ROWS[0];
        assert_eq!(physics.field, "Physics");
        assert_eq!(physics.standard, "5σ");
        assert_eq!(physics.chance, "1 in 3.5 million");
        assert!(physics.application.contains("Higgs Boson"));

        let social = &ROWS[3];
        assert_eq!(social.field, "Social Science");
        assert_eq!(social.standard, "2σ");
        assert_eq!(social.chance, "1 in 20");
        assert!(social.application.contains("hypothesis testing"));
    }

    #[test]
    fn test_cell_anchors_increase_left_to_right_top_to_bottom() {
        let layout = Layout { w: 1920.0, h: 1080.0 };
        for col in 1..4 {
            assert!(cell_anchor(&layout, col, 0).x > cell_anchor(&layout, col - 1, 0).x);
        }
        for row in 1..5 {
            assert!(cell_anchor(&layout, 0, row).y > cell_anchor(&layout, 0, row - 1).y);
        }
    }

    #[test]
    fn test_real_world_leaves_scene_empty() {
        let mut stage = test_stage();
        play(&mut stage).unwrap();
        assert!(stage.scene().is_empty());
        assert!(stage.frames_rendered() > 0);
    }
}
