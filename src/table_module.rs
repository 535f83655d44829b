use egui::{Context, Grid, ScrollArea, TextEdit, Ui};

use crate::{
    editor::{Action, Column, Editor},
    regression,
};

const CELL_WIDTH: f32 = 70.0;

#[derive(Default)]
pub struct TableModule;

impl TableModule {
    pub fn display(&self, ctx: &Context, editor: &Editor, actions: &mut Vec<Action>) {
        egui::SidePanel::right("data_table")
            .min_width(260.0)
            .show(ctx, |ui| self.side_panel(ui, editor, actions));
    }

    pub fn side_panel(&self, ui: &mut Ui, editor: &Editor, actions: &mut Vec<Action>) {
        ui.heading("Fitted line");
        ui.monospace(regression::equation_text(editor.fit().as_ref()));
        ui.separator();

        ui.strong("Data points");
        ScrollArea::vertical()
            .max_height(ui.available_height() / 2.0)
            .show(ui, |ui| self.rows(ui, editor, actions));

        ui.horizontal(|ui| {
            if ui.button("Add row").clicked() {
                actions.push(Action::AddRow);
            }
            if ui.button("Calculate statistics").clicked() {
                actions.push(Action::ComputeStats);
            }
            if ui.button("Clear").clicked() {
                actions.push(Action::Clear);
            }
        });
        ui.separator();

        ui.strong("Statistics");
        for (label, value) in regression::statistics_lines(editor.statistics()) {
            ui.label(format!("{}: {}", label, value));
        }
    }

    fn rows(&self, ui: &mut Ui, editor: &Editor, actions: &mut Vec<Action>) {
        Grid::new("points_grid")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                ui.strong("#");
                ui.strong("X");
                ui.strong("Y");
                ui.end_row();

                for (row, cells) in editor.table().rows().iter().enumerate() {
                    ui.label((row + 1).to_string());
                    for column in [Column::X, Column::Y] {
                        let mut text = cells.cell(column).to_string();
                        let response =
                            ui.add(TextEdit::singleline(&mut text).desired_width(CELL_WIDTH));
                        if response.changed() {
                            actions.push(Action::EditCell { row, column, text });
                        }
                    }
                    ui.end_row();
                }
            });
    }
}
