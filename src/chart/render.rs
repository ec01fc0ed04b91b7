use egui::epaint::Mesh;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Response, Sense, Stroke, Vec2};
use glam::Vec3;

use super::camera::Projected;
use super::{Axis, Chart3D, TickStrategy};
use crate::palette::Lut;
use crate::surface::SurfaceGrid;

const BACKGROUND: Color32 = Color32::from_rgb(250, 250, 252);
const FRAME_COLOR: Color32 = Color32::from_rgb(160, 160, 170);
const TEXT_COLOR: Color32 = Color32::from_rgb(40, 40, 40);
const TICK_TARGET: usize = 5;
const LEGEND_SIZE: Vec2 = Vec2::new(110.0, 190.0);

/// 一个待绘制的四边形，按深度从远到近排序后合并进同一个 Mesh
struct Quad {
    depth: f32,
    corners: [Pos2; 4],
    colors: [Color32; 4],
}

/// 在可用区域绘制整个图表，返回带拖动感应的 Response
pub fn paint_chart(ui: &mut egui::Ui, chart: &Chart3D, surface: &SurfaceGrid, lut: &Lut) -> Response {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, BACKGROUND);

    // 标题
    painter.text(
        rect.center_top() + Vec2::new(0.0, 8.0),
        Align2::CENTER_TOP,
        &chart.title,
        FontId::proportional(18.0),
        TEXT_COLOR,
    );

    // 标题下方留出空间
    let plot_rect = Rect::from_min_max(rect.min + Vec2::new(0.0, 36.0), rect.max);

    paint_bounding_box(&painter, chart, plot_rect);
    paint_surface(&painter, chart, surface, lut, plot_rect);
    paint_axes(&painter, chart, plot_rect);

    if chart.show_legend {
        paint_legend(&painter, chart, lut, rect);
    }

    response
}

fn corner(chart: &Chart3D, ix: usize, iy: usize, iz: usize) -> Vec3 {
    let sign = |i: usize| if i == 0 { -0.5 } else { 0.5 };
    Vec3::new(sign(ix), sign(iy), sign(iz)) * chart.bounding_box
}

fn line_3d(painter: &Painter, chart: &Chart3D, rect: Rect, a: Vec3, b: Vec3, stroke: Stroke) {
    if let (Some(pa), Some(pb)) = (chart.camera.project(a, rect), chart.camera.project(b, rect)) {
        painter.line_segment([pa.pos, pb.pos], stroke);
    }
}

fn paint_bounding_box(painter: &Painter, chart: &Chart3D, rect: Rect) {
    let stroke = Stroke::new(1.0, FRAME_COLOR);
    for a in 0..2 {
        for b in 0..2 {
            line_3d(painter, chart, rect, corner(chart, 0, a, b), corner(chart, 1, a, b), stroke);
            line_3d(painter, chart, rect, corner(chart, a, 0, b), corner(chart, a, 1, b), stroke);
            line_3d(painter, chart, rect, corner(chart, a, b, 0), corner(chart, a, b, 1), stroke);
        }
    }
}

fn paint_surface(painter: &Painter, chart: &Chart3D, surface: &SurfaceGrid, lut: &Lut, rect: Rect) {
    let mut quads = if chart.pixelate {
        pixelated_quads(chart, surface, lut, rect)
    } else {
        smooth_quads(chart, surface, lut, rect)
    };
    if quads.is_empty() {
        return;
    }

    // 画家算法：先画远的
    quads.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut mesh = Mesh::default();
    for quad in &quads {
        let base = mesh.vertices.len() as u32;
        for (pos, color) in quad.corners.iter().zip(quad.colors.iter()) {
            mesh.colored_vertex(*pos, *color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }
    painter.add(egui::Shape::mesh(mesh));
}

fn project_all(chart: &Chart3D, rect: Rect, points: [Vec3; 4]) -> Option<[Projected; 4]> {
    let p0 = chart.camera.project(points[0], rect)?;
    let p1 = chart.camera.project(points[1], rect)?;
    let p2 = chart.camera.project(points[2], rect)?;
    let p3 = chart.camera.project(points[3], rect)?;
    Some([p0, p1, p2, p3])
}

/// 每个数据点一个平顶单元格，整格同色
fn pixelated_quads(chart: &Chart3D, surface: &SurfaceGrid, lut: &Lut, rect: Rect) -> Vec<Quad> {
    let mut quads = Vec::with_capacity(surface.row_count() * surface.columns());
    for (row_index, row) in surface.rows().iter().enumerate() {
        let z = surface.row_z(row_index);
        for (col, &value) in row.iter().enumerate() {
            let x = col as f64;
            let points = [
                chart.to_scene(x, value, z),
                chart.to_scene(x + 1.0, value, z),
                chart.to_scene(x + 1.0, value, z + 1.0),
                chart.to_scene(x, value, z + 1.0),
            ];
            if let Some(p) = project_all(chart, rect, points) {
                let color = lut.color_for(value);
                quads.push(Quad {
                    depth: p.iter().map(|q| q.depth).sum::<f32>() / 4.0,
                    corners: [p[0].pos, p[1].pos, p[2].pos, p[3].pos],
                    colors: [color; 4],
                });
            }
        }
    }
    quads
}

/// 顶点位于单元格中心，颜色按顶点插值
fn smooth_quads(chart: &Chart3D, surface: &SurfaceGrid, lut: &Lut, rect: Rect) -> Vec<Quad> {
    let rows = surface.rows();
    if rows.len() < 2 || surface.columns() < 2 {
        return Vec::new();
    }

    let mut quads = Vec::with_capacity((rows.len() - 1) * (surface.columns() - 1));
    for r in 0..rows.len() - 1 {
        let (z0, z1) = (surface.row_z(r) + 0.5, surface.row_z(r + 1) + 0.5);
        for c in 0..surface.columns() - 1 {
            let (x0, x1) = (c as f64 + 0.5, c as f64 + 1.5);
            let values = [rows[r][c], rows[r][c + 1], rows[r + 1][c + 1], rows[r + 1][c]];
            let points = [
                chart.to_scene(x0, values[0], z0),
                chart.to_scene(x1, values[1], z0),
                chart.to_scene(x1, values[2], z1),
                chart.to_scene(x0, values[3], z1),
            ];
            if let Some(p) = project_all(chart, rect, points) {
                quads.push(Quad {
                    depth: p.iter().map(|q| q.depth).sum::<f32>() / 4.0,
                    corners: [p[0].pos, p[1].pos, p[2].pos, p[3].pos],
                    colors: values.map(|v| lut.color_for(v)),
                });
            }
        }
    }
    quads
}

fn paint_axes(painter: &Painter, chart: &Chart3D, rect: Rect) {
    let size = chart.bounding_box;
    let (bx, by, bz) = (size.x, size.y, size.z);
    let (hx, hy, hz) = (bx / 2.0, by / 2.0, bz / 2.0);
    let font = FontId::proportional(11.0);
    let stroke = Stroke::new(1.0, TEXT_COLOR);

    // X 轴沿最新一行所在的下边
    paint_axis(
        painter,
        chart,
        rect,
        &chart.axis_x,
        |t| Vec3::new((t - 0.5) * bx, -hy, -hz),
        Vec3::new(0.0, 0.0, -0.08),
        &font,
        stroke,
    );
    // Y 轴沿同侧的左竖边
    paint_axis(
        painter,
        chart,
        rect,
        &chart.axis_y,
        |t| Vec3::new(-hx, (t - 0.5) * by, -hz),
        Vec3::new(-0.08, 0.0, 0.0),
        &font,
        stroke,
    );
    // Z 轴沿右下边
    paint_axis(
        painter,
        chart,
        rect,
        &chart.axis_z,
        |t| Vec3::new(hx, -hy, (t - 0.5) * bz),
        Vec3::new(0.08, 0.0, 0.0),
        &font,
        stroke,
    );
}

#[allow(clippy::too_many_arguments)]
fn paint_axis(
    painter: &Painter,
    chart: &Chart3D,
    rect: Rect,
    axis: &Axis,
    along: impl Fn(f32) -> Vec3,
    outward: Vec3,
    font: &FontId,
    stroke: Stroke,
) {
    let offset = |p: Vec3, k: f32| p + outward * k;

    if axis.tick_strategy() == TickStrategy::Numeric {
        for value in axis.tick_values(TICK_TARGET) {
            let t = axis.normalize(value) as f32;
            let base = along(t);
            line_3d(painter, chart, rect, base, offset(base, 0.3), stroke);
            if let Some(label) = chart.camera.project(offset(base, 0.6), rect) {
                painter.text(label.pos, Align2::CENTER_CENTER, format!("{:.0}", value), font.clone(), TEXT_COLOR);
            }
        }
    }

    if let Some(title) = chart.camera.project(offset(along(0.5), 1.6), rect) {
        painter.text(title.pos, Align2::CENTER_CENTER, axis.title(), FontId::proportional(13.0), TEXT_COLOR);
    }
}

fn paint_legend(painter: &Painter, chart: &Chart3D, lut: &Lut, rect: Rect) {
    let legend_rect = Rect::from_min_size(rect.right_top() + Vec2::new(-LEGEND_SIZE.x - 10.0, 10.0), LEGEND_SIZE);
    painter.rect_filled(legend_rect, 4.0, Color32::from_white_alpha(230));
    painter.rect_stroke(legend_rect, 4.0, Stroke::new(1.0, FRAME_COLOR), egui::StrokeKind::Inside);

    painter.text(
        legend_rect.left_top() + Vec2::new(8.0, 6.0),
        Align2::LEFT_TOP,
        &chart.series_name,
        FontId::proportional(13.0),
        TEXT_COLOR,
    );

    let Some((min, max)) = lut.range() else {
        return;
    };

    // 竖直色条，上高下低
    let bar = Rect::from_min_size(legend_rect.left_top() + Vec2::new(12.0, 30.0), Vec2::new(18.0, LEGEND_SIZE.y - 44.0));
    let segments = 32;
    let mut mesh = Mesh::default();
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let value = max - (max - min) * t as f64;
        let color = lut.color_for(value);
        let y = bar.top() + bar.height() * t;
        mesh.colored_vertex(Pos2::new(bar.left(), y), color);
        mesh.colored_vertex(Pos2::new(bar.right(), y), color);
        if i > 0 {
            let base = (i as u32 - 1) * 2;
            mesh.add_triangle(base, base + 1, base + 3);
            mesh.add_triangle(base, base + 3, base + 2);
        }
    }
    painter.add(egui::Shape::mesh(mesh));

    let font = FontId::proportional(11.0);
    for step in lut.steps() {
        let t = ((max - step.value) / (max - min).max(f64::EPSILON)) as f32;
        let y = bar.top() + bar.height() * t;
        painter.text(
            Pos2::new(bar.right() + 6.0, y),
            Align2::LEFT_CENTER,
            format!("{:.0} {}", step.value, lut.units()),
            font.clone(),
            TEXT_COLOR,
        );
    }
}
