use corkboard_canvas::{
    render_scene, Frame, Grid, ImageContent, InteractionController, Modifiers, Rect, Scene,
    SceneObject, Viewport,
};
use corkboard_settings::CanvasConfig;

use crate::support::{image_at, labeled_note, Op, Recorder};

fn controller() -> InteractionController {
    let mut canvas = InteractionController::new(&CanvasConfig::default());
    canvas.set_screen_size(800.0, 600.0);
    canvas
}

fn frame<'a>(scene: &'a Scene, viewport: &'a Viewport, grid: &'a Grid) -> Frame<'a> {
    Frame {
        scene,
        viewport,
        grid,
        screen_width: 800.0,
        screen_height: 600.0,
        rubber_band: None,
    }
}

fn is_handle(op: &Op, size: f64) -> bool {
    matches!(op, Op::Rectangle(_, _, w, h) if *w == size && *h == size)
}

#[test]
fn test_empty_scene_draws_background_then_transform() {
    let canvas = controller();
    let mut ctx = Recorder::new();

    assert_eq!(canvas.render(&mut ctx), 0);
    assert_eq!(
        &ctx.ops[..6],
        &[
            Op::Source(0.96, 0.96, 0.94, 1.0),
            Op::Rectangle(0.0, 0.0, 800.0, 600.0),
            Op::Fill,
            Op::Save,
            Op::Scale(1.0, 1.0),
            Op::Translate(0.0, 0.0),
        ]
    );
    assert_eq!(ctx.ops.last(), Some(&Op::Restore));
}

#[test]
fn test_offscreen_objects_are_culled() {
    let mut canvas = controller();
    canvas.document_mut().add_object(labeled_note(0.0, 0.0, "near", 0));
    canvas.document_mut().add_object(labeled_note(5000.0, 5000.0, "far", 0));

    let mut ctx = Recorder::new();
    assert_eq!(canvas.render(&mut ctx), 1);
    assert_eq!(ctx.texts(), vec!["near"]);
}

#[test]
fn test_objects_draw_in_z_order() {
    let mut scene = Scene::default();
    scene.push(labeled_note(0.0, 0.0, "top", 1));
    scene.push(labeled_note(50.0, 50.0, "bottom", 0));
    let (viewport, grid) = (Viewport::new(), Grid::default());

    let mut ctx = Recorder::new();
    assert_eq!(render_scene(&mut ctx, &frame(&scene, &viewport, &grid)), 2);
    assert_eq!(ctx.texts(), vec!["bottom", "top"]);
}

#[test]
fn test_selection_handles_scale_with_zoom() {
    let mut scene = Scene::default();
    let note = labeled_note(0.0, 0.0, "n", 0);
    let id = note.id;
    scene.push(note);
    scene.select_only(id);
    let grid = Grid::default();

    let viewport = Viewport::new();
    let mut ctx = Recorder::new();
    render_scene(&mut ctx, &frame(&scene, &viewport, &grid));
    // Four corners, each filled and stroked.
    assert_eq!(ctx.count(|op| is_handle(op, 8.0)), 8);

    let mut zoomed = Viewport::new();
    zoomed.set_zoom(2.0, None);
    let mut ctx = Recorder::new();
    render_scene(&mut ctx, &frame(&scene, &zoomed, &grid));
    assert_eq!(ctx.count(|op| is_handle(op, 4.0)), 8);
}

#[test]
fn test_hover_outline() {
    let mut scene = Scene::default();
    let note = labeled_note(0.0, 0.0, "n", 0);
    let id = note.id;
    scene.push(note);
    let (viewport, grid) = (Viewport::new(), Grid::default());
    let outline = |op: &Op| *op == Op::Rectangle(0.0, 0.0, 100.0, 100.0);

    let mut plain = Recorder::new();
    render_scene(&mut plain, &frame(&scene, &viewport, &grid));

    scene.set_hovered(Some(id));
    let mut hovered = Recorder::new();
    render_scene(&mut hovered, &frame(&scene, &viewport, &grid));

    assert_eq!(hovered.count(outline), plain.count(outline) + 1);
}

#[test]
fn test_missing_image_draws_placeholder() {
    let mut scene = Scene::default();
    scene.push(image_at(0.0, 0.0, 100.0, 50.0));
    let (viewport, grid) = (Viewport::new(), Grid::default());

    let mut ctx = Recorder::new();
    render_scene(&mut ctx, &frame(&scene, &viewport, &grid));

    assert_eq!(ctx.count(|op| matches!(op, Op::Image(_))), 0);
    assert!(ctx.ops.contains(&Op::MoveTo(0.0, 0.0)));
    assert!(ctx.ops.contains(&Op::LineTo(100.0, 50.0)));
}

#[test]
fn test_failed_image_is_not_retried() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("photo.png");
    image::RgbImage::new(40, 20).save(&path).expect("write png");

    let content = ImageContent::open(&path).expect("image opens");
    let mut scene = Scene::default();
    let obj = SceneObject::image(Rect::new(0.0, 0.0, 40.0, 20.0), content);
    let id = obj.id;
    scene.push(obj);
    let (viewport, grid) = (Viewport::new(), Grid::default());

    let mut ctx = Recorder::failing_images();
    render_scene(&mut ctx, &frame(&scene, &viewport, &grid));
    render_scene(&mut ctx, &frame(&scene, &viewport, &grid));

    assert_eq!(ctx.count(|op| matches!(op, Op::Image(_))), 1);
    let available = scene.get(id).and_then(|obj| match &obj.kind {
        corkboard_canvas::ObjectKind::Image(image) => Some(image.is_available()),
        _ => None,
    });
    assert_eq!(available, Some(false));
}

#[test]
fn test_grid_lines_only_when_visible() {
    let mut canvas = controller();
    let mut ctx = Recorder::new();
    canvas.render(&mut ctx);
    assert_eq!(ctx.count(|op| matches!(op, Op::LineTo(..))), 0);

    canvas.toggle_grid();
    let mut ctx = Recorder::new();
    canvas.render(&mut ctx);
    assert!(ctx.count(|op| matches!(op, Op::LineTo(..))) > 0);
}

#[test]
fn test_rubber_band_drawn_last() {
    let mut canvas = controller();
    canvas.document_mut().add_object(labeled_note(0.0, 0.0, "n", 0));
    canvas.drag_begin(300.0, 300.0, Modifiers::SHIFT);
    canvas.drag_update(200.0, 250.0);

    let mut ctx = Recorder::new();
    canvas.render(&mut ctx);

    let last_rect = ctx
        .ops
        .iter()
        .rev()
        .find(|op| matches!(op, Op::Rectangle(..)));
    assert_eq!(last_rect, Some(&Op::Rectangle(200.0, 250.0, 100.0, 50.0)));
}
