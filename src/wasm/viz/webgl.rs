use super::{bind_resize, container_size, Mounted};
use crate::config::{CameraSpec, CarouselConfig, Lighting};
use crate::motion::Motion;
use crate::projection::{aspect, perspective, view};
use crate::sample::{interleave, Point};
use crate::wasm::frame_loop::FrameLoop;
use crate::wasm::listener::Listener;
use glam::Mat4;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, HtmlElement, MouseEvent, WebGl2RenderingContext as GL, WebGlProgram,
    WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject,
};

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_color;

uniform mat4 u_projection;
uniform mat4 u_view;
uniform mat4 u_model;
uniform float u_point_size;

out vec3 v_color;
out vec3 v_normal;

void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_color = a_color;
    v_normal = normalize(world.xyz + vec3(1e-5));
    gl_Position = u_projection * u_view * world;
    gl_PointSize = u_point_size / gl_Position.w;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec3 v_color;
in vec3 v_normal;

uniform bool u_points;
uniform float u_ambient;
uniform float u_directional;
uniform vec3 u_light_dir;

out vec4 out_color;

void main() {
    float light = 1.0;
    if (u_points) {
        vec2 pc = gl_PointCoord * 2.0 - 1.0;
        if (dot(pc, pc) > 1.0) {
            discard;
        }
        light = u_ambient + u_directional * max(dot(v_normal, normalize(u_light_dir)), 0.0);
    }
    out_color = vec4(min(v_color * light, vec3(1.0)), 1.0);
}
"#;

const STRIDE: i32 = 6 * 4;
const CLEAR: [f32; 3] = [0.04, 0.04, 0.06];

struct Uniforms {
    projection: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    model: Option<WebGlUniformLocation>,
    point_size: Option<WebGlUniformLocation>,
    points: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    directional: Option<WebGlUniformLocation>,
    light_dir: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            projection: at("u_projection"),
            view: at("u_view"),
            model: at("u_model"),
            point_size: at("u_point_size"),
            points: at("u_points"),
            ambient: at("u_ambient"),
            directional: at("u_directional"),
            light_dir: at("u_light_dir"),
        }
    }
}

/// A vertex array of interleaved position/color vertices.
struct Mesh {
    vao: WebGlVertexArrayObject,
    count: i32,
    mode: u32,
}

impl Mesh {
    fn upload(gl: &GL, vertices: &[f32], mode: u32) -> Result<Self, JsValue> {
        let vao = gl.create_vertex_array().ok_or("failed to create vertex array")?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = gl.create_buffer().ok_or("failed to create buffer")?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let data = js_sys::Float32Array::from(vertices);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);

        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, STRIDE, 0);
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(1, 3, GL::FLOAT, false, STRIDE, 12);
        gl.bind_vertex_array(None);

        Ok(Self {
            vao,
            count: (vertices.len() / 6) as i32,
            mode,
        })
    }

    fn draw(&self, gl: &GL) {
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(self.mode, 0, self.count);
    }
}

/// Red X, green Y, blue Z lines from the origin.
fn axes_vertices(length: f32) -> Vec<f32> {
    let mut vertices = Vec::with_capacity(36);
    for axis in 0..3 {
        let mut color = [0.0; 3];
        color[axis] = 1.0;
        let mut tip = [0.0; 3];
        tip[axis] = length;
        vertices.extend([0.0, 0.0, 0.0]);
        vertices.extend(color);
        vertices.extend(tip);
        vertices.extend(color);
    }
    vertices
}

struct Scene {
    gl: GL,
    program: WebGlProgram,
    uniforms: Uniforms,
    cloud: Mesh,
    axes: Mesh,
    camera: CameraSpec,
    lighting: Lighting,
    point_size: f32,
    projection: Mat4,
    view: Mat4,
}

impl Scene {
    fn new(gl: GL, points: &[Point], config: &CarouselConfig, aspect: f32) -> Result<Self, JsValue> {
        let vs = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fs = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vs, &fs)?;
        let uniforms = Uniforms::locate(&gl, &program);

        let cloud = Mesh::upload(&gl, &interleave(points), GL::POINTS)?;
        let axes = Mesh::upload(&gl, &axes_vertices(config.axes_length), GL::LINES)?;

        gl.enable(GL::DEPTH_TEST);
        gl.clear_color(CLEAR[0], CLEAR[1], CLEAR[2], 1.0);

        Ok(Self {
            gl,
            program,
            uniforms,
            cloud,
            axes,
            camera: config.camera,
            lighting: config.lighting,
            point_size: config.point_size,
            projection: perspective(&config.camera, aspect),
            view: view(&config.camera),
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(aspect) = aspect(width, height) {
            self.projection = perspective(&self.camera, aspect);
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    fn draw(&self, model: Mat4) {
        let gl = &self.gl;
        let u = &self.uniforms;
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.use_program(Some(&self.program));

        gl.uniform_matrix4fv_with_f32_array(u.projection.as_ref(), false, &self.projection.to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(u.view.as_ref(), false, &self.view.to_cols_array());
        gl.uniform1f(u.point_size.as_ref(), self.point_size);
        gl.uniform1f(u.ambient.as_ref(), self.lighting.ambient);
        gl.uniform1f(u.directional.as_ref(), self.lighting.directional);
        gl.uniform3fv_with_f32_array(u.light_dir.as_ref(), &self.lighting.direction);

        // axes stay fixed in world space
        gl.uniform1i(u.points.as_ref(), 0);
        gl.uniform_matrix4fv_with_f32_array(u.model.as_ref(), false, &Mat4::IDENTITY.to_cols_array());
        self.axes.draw(gl);

        gl.uniform1i(u.points.as_ref(), 1);
        gl.uniform_matrix4fv_with_f32_array(u.model.as_ref(), false, &model.to_cols_array());
        self.cloud.draw(gl);

        gl.bind_vertex_array(None);
    }
}

pub(super) fn mount(
    container: &HtmlElement,
    canvas: HtmlCanvasElement,
    points: Vec<Point>,
    config: &CarouselConfig,
) -> Result<Mounted, JsValue> {
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into()?;

    let (width, height) = (canvas.width(), canvas.height());
    gl.viewport(0, 0, width as i32, height as i32);
    let scene = Scene::new(gl, &points, config, aspect(width, height).unwrap_or(1.0))?;
    let scene = Rc::new(RefCell::new(scene));
    let motion = Rc::new(RefCell::new(Motion::default()));

    let frame = {
        let scene = Rc::clone(&scene);
        let motion = Rc::clone(&motion);
        let step = config.auto_rotation;
        FrameLoop::start(move || {
            let mut motion = motion.borrow_mut();
            motion.tick(step);
            scene.borrow().draw(motion.rotation.matrix());
        })?
    };

    let resize = {
        let container = container.clone();
        bind_resize(move || {
            if let Some((width, height)) = container_size(&container) {
                canvas.set_width(width);
                canvas.set_height(height);
                scene.borrow_mut().resize(width, height);
            }
        })?
    };

    let pointer = bind_drag(container, &motion, config.drag_sensitivity)?;

    Ok(Mounted {
        frame,
        resize,
        pointer,
    })
}

/// Click-and-drag rotation on the container.
fn bind_drag(
    container: &HtmlElement,
    motion: &Rc<RefCell<Motion>>,
    sensitivity: f32,
) -> Result<Vec<Listener>, JsValue> {
    let position = |event: &web_sys::Event| {
        event
            .dyn_ref::<MouseEvent>()
            .map(|e| (f64::from(e.client_x()), f64::from(e.client_y())))
    };

    let down = {
        let motion = Rc::clone(motion);
        Listener::bind(container, "mousedown", move |event| {
            if let Some((x, y)) = position(&event) {
                motion.borrow_mut().drag.begin(x, y);
            }
        })?
    };
    let moved = {
        let motion = Rc::clone(motion);
        Listener::bind(container, "mousemove", move |event| {
            if let Some((x, y)) = position(&event) {
                motion.borrow_mut().pointer_moved(x, y, sensitivity);
            }
        })?
    };
    let release = |kind: &'static str| {
        let motion = Rc::clone(motion);
        Listener::bind(container, kind, move |_| motion.borrow_mut().drag.end())
    };
    let up = release("mouseup")?;
    let leave = release("mouseleave")?;

    Ok(vec![down, moved, up, leave])
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl.create_shader(kind).ok_or("failed to create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(JsValue::from_str(&format!("shader compile failed: {info}")))
    }
}

fn link_program(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl.create_program().ok_or("failed to create program")?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(JsValue::from_str(&format!("program link failed: {info}")))
    }
}

#[cfg(test)]
mod tests {
    use super::axes_vertices;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn axes_have_one_colored_segment_per_axis() {
        let v = axes_vertices(3.0);
        assert_eq!(v.len(), 36);
        // Y axis tip: position (0, 3, 0) colored green
        assert_eq!(&v[18..24], &[0.0, 3.0, 0.0, 0.0, 1.0, 0.0]);
    }
}
