use egui::{Align2, Color32, Context, FontId, Frame, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

use crate::{
    editor::{Action, Editor, Point},
    mapping::CoordinateMapper,
};

const AXIS_STROKE: (f32, Color32) = (1.0, Color32::from_rgb(0x44, 0x44, 0x44));
const FIT_LINE_STROKE: (f32, Color32) = (2.0, Color32::RED);
const HOVER_STROKE: (f32, Color32) = (3.0, Color32::from_rgb(255, 165, 0));
const LABEL_STROKE: (f32, Color32) = (1.0, Color32::from_rgb(0x55, 0x55, 0x55));
const POINT_COLOR: Color32 = Color32::BLUE;
const TEXT_COLOR: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
const BACKGROUND: Color32 = Color32::WHITE;
const POINT_RADIUS: f32 = 6.0;
const TICK_LENGTH: f64 = 5.0;

pub struct CanvasModule {
    mapper: CoordinateMapper,
}

impl CanvasModule {
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self { mapper }
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn display(&self, ctx: &Context, editor: &Editor, actions: &mut Vec<Action>) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                Frame::canvas(ui.style()).show(ui, |ui| self.main_view(ui, editor, actions));
            });
        });
    }

    pub fn main_view(&self, ui: &mut Ui, editor: &Editor, actions: &mut Vec<Action>) {
        let size = Vec2::new(self.mapper.width() as f32, self.mapper.height() as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let canvas = Canvas {
            origin: response.rect.min,
            mapper: &self.mapper,
        };

        canvas.collect_input(&response, actions);

        painter.rect_filled(response.rect, 0.0, BACKGROUND);
        canvas.paint_axes(&painter);

        if let Some(fit) = editor.fit() {
            let (extent_x, _) = self.mapper.extent();
            painter.line_segment(
                [
                    canvas.to_screen(Point::new(0.0, fit.predict(0.0))),
                    canvas.to_screen(Point::new(extent_x, fit.predict(extent_x))),
                ],
                FIT_LINE_STROKE,
            );
        }

        for point in editor.points().iter() {
            painter.circle_filled(canvas.to_screen(*point), POINT_RADIUS, POINT_COLOR);
        }
        if let Some(point) = editor.hovered() {
            let center = canvas.to_screen(point);
            painter.circle_stroke(center, POINT_RADIUS, HOVER_STROKE);
            paint_point_label(&painter, center, point);
        }
    }
}

/// The allocated canvas rect, the mapper works relative to its top left corner.
struct Canvas<'a> {
    origin: Pos2,
    mapper: &'a CoordinateMapper,
}

impl Canvas<'_> {
    fn pixel(&self, px: f64, py: f64) -> Pos2 {
        self.origin + Vec2::new(px as f32, py as f32)
    }

    fn to_screen(&self, point: Point) -> Pos2 {
        let (px, py) = self.mapper.to_pixel(point);
        self.pixel(px, py)
    }

    fn to_canvas(&self, pos: Pos2) -> (f64, f64) {
        let offset = pos - self.origin;
        (offset.x as f64, offset.y as f64)
    }

    fn collect_input(&self, response: &Response, actions: &mut Vec<Action>) {
        actions.push(Action::PointerMoved(
            response.hover_pos().map(|pos| self.to_canvas(pos)),
        ));
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let (px, py) = self.to_canvas(pos);
                actions.push(Action::Clicked(px, py));
            }
        }
    }

    fn paint_axes(&self, painter: &egui::Painter) {
        let mapper = self.mapper;
        let (width, height, margin) = (mapper.width(), mapper.height(), mapper.margin());
        let font = FontId::proportional(12.0);

        painter.line_segment(
            [self.pixel(margin, 0.0), self.pixel(margin, height - margin)],
            AXIS_STROKE,
        );
        painter.line_segment(
            [
                self.pixel(margin, height - margin),
                self.pixel(width, height - margin),
            ],
            AXIS_STROKE,
        );

        let (x_ticks, y_ticks) = mapper.ticks();
        for tick in x_ticks {
            let (px, _) = mapper.to_pixel(Point::new(tick, 0.0));
            painter.line_segment(
                [
                    self.pixel(px, height - margin),
                    self.pixel(px, height - margin + TICK_LENGTH),
                ],
                AXIS_STROKE,
            );
            painter.text(
                self.pixel(px, height - margin + TICK_LENGTH + 2.0),
                Align2::CENTER_TOP,
                tick,
                font.clone(),
                TEXT_COLOR,
            );
        }
        for tick in y_ticks {
            let (_, py) = mapper.to_pixel(Point::new(0.0, tick));
            painter.line_segment(
                [
                    self.pixel(margin - TICK_LENGTH, py),
                    self.pixel(margin, py),
                ],
                AXIS_STROKE,
            );
            painter.text(
                self.pixel(margin - TICK_LENGTH - 2.0, py),
                Align2::RIGHT_CENTER,
                tick,
                font.clone(),
                TEXT_COLOR,
            );
        }

        painter.text(
            self.pixel(width - 20.0, height - 20.0),
            Align2::LEFT_BOTTOM,
            "X",
            font.clone(),
            TEXT_COLOR,
        );
        painter.text(self.pixel(10.0, 20.0), Align2::LEFT_BOTTOM, "Y", font, TEXT_COLOR);
    }
}

fn paint_point_label(painter: &egui::Painter, center: Pos2, point: Point) {
    let label = format!("({}, {})", point.x, point.y);
    let galley = painter.layout_no_wrap(label, FontId::proportional(13.0), Color32::BLACK);
    let size = galley.size();
    // bottom left corner of the text sits up and to the right of the marker
    let text_pos = center + Vec2::new(10.0, -10.0 - size.y);
    let frame = Rect::from_min_size(text_pos - Vec2::new(5.0, 3.0), size + Vec2::new(10.0, 6.0));
    painter.rect(frame, 0.0, Color32::WHITE, Stroke::from(LABEL_STROKE));
    painter.galley(text_pos, galley);
}
