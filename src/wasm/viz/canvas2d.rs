use super::{bind_resize, container_size, Mounted};
use crate::config::CarouselConfig;
use crate::projection::{css_rgb, project_fallback};
use crate::sample::Point;
use crate::wasm::frame_loop::FrameLoop;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

const BACKGROUND: &str = "#111111";
const AXIS_COLOR: &str = "#444444";
const CAPTION_COLOR: &str = "#cccccc";

/// Rotating point cloud faked on a 2D canvas.
struct FlatScene {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    points: Vec<Point>,
    colors: Vec<String>,
    angle: f32,
    angle_step: f32,
    scale: f64,
}

impl FlatScene {
    fn new(canvas: HtmlCanvasElement, points: Vec<Point>, config: &CarouselConfig) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or("2d context not available")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let colors = points.iter().map(|p| css_rgb(p.color)).collect();

        Ok(Self {
            canvas,
            ctx,
            points,
            colors,
            angle: 0.0,
            angle_step: config.fallback_angle_step,
            scale: config.fallback_scale,
        })
    }

    fn draw(&mut self) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        let center = (width / 2.0, height / 2.0);
        let ctx = &self.ctx;

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, width, height);

        ctx.set_stroke_style_str(AXIS_COLOR);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(0.0, center.1);
        ctx.line_to(width, center.1);
        ctx.move_to(center.0, 0.0);
        ctx.line_to(center.0, height);
        ctx.stroke();

        self.angle += self.angle_step;
        for (point, color) in self.points.iter().zip(&self.colors) {
            let screen = project_fallback(point.position, self.angle, center, self.scale);
            ctx.begin_path();
            if ctx.arc(screen.x, screen.y, screen.radius, 0.0, TAU).is_ok() {
                ctx.set_fill_style_str(color);
                ctx.fill();
            }
        }

        ctx.set_fill_style_str(CAPTION_COLOR);
        ctx.set_font("12px sans-serif");
        ctx.fill_text(&format!("{} points", self.points.len()), 10.0, 20.0)
            .ok();
        ctx.fill_text("Placeholder visualization", 10.0, 36.0).ok();
    }
}

pub(super) fn mount(
    container: &HtmlElement,
    canvas: HtmlCanvasElement,
    points: Vec<Point>,
    config: &CarouselConfig,
) -> Result<Mounted, JsValue> {
    let mut scene = FlatScene::new(canvas.clone(), points, config)?;
    let frame = FrameLoop::start(move || scene.draw())?;

    let resize = {
        let container = container.clone();
        bind_resize(move || {
            if let Some((width, height)) = container_size(&container) {
                canvas.set_width(width);
                canvas.set_height(height);
            }
        })?
    };

    Ok(Mounted {
        frame,
        resize,
        pointer: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn scene_with(points: Vec<Point>) -> FlatScene {
        let canvas = web_sys::window()
            .unwrap()
            .document()
            .unwrap()
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_width(320);
        canvas.set_height(240);
        FlatScene::new(canvas, points, &CarouselConfig::default()).unwrap()
    }

    fn pixel(scene: &FlatScene, x: f64, y: f64) -> [u8; 4] {
        let data = scene.ctx.get_image_data(x, y, 1.0, 1.0).unwrap().data();
        [data[0], data[1], data[2], data[3]]
    }

    #[wasm_bindgen_test]
    fn one_frame_paints_background_axes_points_and_caption() {
        let mut scene = scene_with(vec![Point {
            position: [1.0, 1.0, 0.0],
            color: [1.0, 0.0, 0.0],
            image: String::new(),
        }]);
        scene.draw();

        assert_eq!(scene.angle, scene.angle_step);

        // corner far from the axes, the point and the caption
        assert_eq!(pixel(&scene, 300.0, 220.0), [17, 17, 17, 255]);

        // vertical axis runs through the center column
        let axis = pixel(&scene, 160.0, 220.0);
        assert!(axis[0] > 17, "axis pixel {axis:?}");

        // the point lands one unit right and up of center: (210, 70)
        let point = pixel(&scene, 210.0, 70.0);
        assert!(point[0] > 200 && point[1] < 40 && point[2] < 40, "point pixel {point:?}");

        let caption = scene
            .ctx
            .get_image_data(10.0, 8.0, 190.0, 32.0)
            .unwrap()
            .data();
        assert!(caption.iter().step_by(4).any(|r| *r > 100), "caption not drawn");
    }

    #[wasm_bindgen_test]
    fn angle_accumulates_without_damping() {
        let mut scene = scene_with(Vec::new());
        for _ in 0..5 {
            scene.draw();
        }
        assert!((scene.angle - 5.0 * scene.angle_step).abs() < 1e-6);
    }
}
