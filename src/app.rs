use egui::{Align2, Context, Ui, Vec2};

use crate::{
    canvas_module::CanvasModule,
    config::Config,
    editor::{Action, Editor},
    mapping::DomainPolicy,
    table_module::TableModule,
};

pub struct FitApp {
    editor: Editor,
    canvas_module: CanvasModule,
    table_module: TableModule,
}

impl FitApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &Config) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            editor: Editor::default(),
            canvas_module: CanvasModule::new(config.mapper()),
            table_module: TableModule::default(),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Applies the actions in the order they were produced.
    pub fn apply(&mut self, actions: Vec<Action>) {
        let mapper = *self.canvas_module.mapper();
        for action in actions {
            self.editor = std::mem::take(&mut self.editor).update(&mapper, action);
        }
    }
}

impl eframe::App for FitApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();
        egui::TopBottomPanel::top("menu").show(ctx, |ui| self.menu(ui));
        self.table_module.display(ctx, &self.editor, &mut actions);
        self.canvas_module.display(ctx, &self.editor, &mut actions);
        self.notice_window(ctx, &mut actions);

        // pointer moves arrive every frame, only repaint for real changes
        let before = self.editor.clone();
        self.apply(actions);
        if self.editor != before {
            ctx.request_repaint();
        }
    }
}

impl FitApp {
    fn menu(&self, ui: &mut Ui) {
        egui::menu::bar(ui, |ui| {
            ui.horizontal_centered(|ui| {
                ui.strong("Scatterfit");
                ui.separator();
                let domain = match self.canvas_module.mapper().policy() {
                    DomainPolicy::Bounded { scale_max } => format!("domain 0 to {}", scale_max),
                    DomainPolicy::Unbounded => "domain: pixel offsets".to_string(),
                };
                ui.label(domain);
                ui.separator();
                ui.label(format!("{} points", self.editor.points().len()));
            });
        });
    }

    fn notice_window(&self, ctx: &Context, actions: &mut Vec<Action>) {
        if let Some(notice) = self.editor.notice() {
            egui::Window::new("Invalid input")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(notice);
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            actions.push(Action::DismissNotice);
                        }
                    });
                });
        }
    }
}
