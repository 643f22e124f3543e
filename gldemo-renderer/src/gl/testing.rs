//! A `GlBackend` that records calls instead of talking to a driver.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet, VecDeque},
};

use crate::gl::GlBackend;

pub(crate) const VALID_VERTEX_SOURCE: &str = "#version 330\nvoid main() { gl_Position = vec4(0.0); }";
pub(crate) const VALID_FRAGMENT_SOURCE: &str = "#version 330\nout vec4 c;\nvoid main() { c = vec4(1.0); }";
pub(crate) const INVALID_SOURCE: &str = "#version 330\nvoid mian() {";

/// Compiles any source containing `void main()`, fails everything else with a
/// driver-like info log. Links only when every attached shader compiled.
#[derive(Debug, Default)]
pub(crate) struct RecordingGl {
    calls: RefCell<Vec<String>>,
    next_id: Cell<u32>,
    fail_create: Cell<bool>,
    sources: RefCell<HashMap<u32, String>>,
    compiled: RefCell<HashMap<u32, bool>>,
    attached: RefCell<HashMap<u32, Vec<u32>>>,
    linked: RefCell<HashMap<u32, bool>>,
    live: RefCell<HashSet<u32>>,
    uniforms: RefCell<HashMap<u32, [f32; 16]>>,
    uploads: RefCell<Vec<(u32, usize)>>,
    bound_vertex_array: Cell<Option<u32>>,
    bound_buffers: RefCell<HashMap<u32, Option<u32>>>,
    pending_errors: RefCell<VecDeque<u32>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Position of the first call starting with `prefix`.
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c.starts_with(prefix))
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn fail_next_creates(&self, fail: bool) {
        self.fail_create.set(fail);
    }

    pub fn push_error(&self, code: u32) {
        self.pending_errors.borrow_mut().push_back(code);
    }

    pub fn live_objects(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn is_live(&self, id: u32) -> bool {
        self.live.borrow().contains(&id)
    }

    pub fn uniform(&self, location: u32) -> Option<[f32; 16]> {
        self.uniforms.borrow().get(&location).copied()
    }

    pub fn uploads(&self) -> Vec<(u32, usize)> {
        self.uploads.borrow().clone()
    }

    pub fn bound_vertex_array(&self) -> Option<u32> {
        self.bound_vertex_array.get()
    }

    pub fn bound_buffer(&self, target: u32) -> Option<u32> {
        self.bound_buffers.borrow().get(&target).copied().flatten()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn create(&self, kind: &str) -> Result<u32, String> {
        if self.fail_create.get() {
            self.record(format!("{kind}() -> error"));
            return Err(format!("{kind} failed"));
        }

        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.live.borrow_mut().insert(id);
        self.record(format!("{kind}() -> {id}"));
        Ok(id)
    }

    fn delete(&self, kind: &str, id: u32) {
        let was_live = self.live.borrow_mut().remove(&id);
        assert!(was_live, "{kind}({id}) on an object that is not live");
        self.record(format!("{kind}({id})"));
    }
}

impl GlBackend for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type Texture = u32;

    fn create_shader(&self, stage: u32) -> Result<u32, String> {
        self.create(&format!("create_shader[{stage:#06x}]"))
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_string());
        self.record(format!("shader_source({shader})"));
    }

    fn compile_shader(&self, shader: u32) {
        let ok = self.sources.borrow().get(&shader).is_some_and(|s| s.contains("void main()"));
        self.compiled.borrow_mut().insert(shader, ok);
        self.record(format!("compile_shader({shader})"));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.compiled.borrow().get(&shader).copied().unwrap_or(false)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:2(1): error: syntax error, unexpected end of file\n".to_string()
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.delete("delete_shader", shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        self.create("create_program")
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.attached.borrow_mut().entry(program).or_default().push(shader);
        self.record(format!("attach_shader({program}, {shader})"));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(shaders) = self.attached.borrow_mut().get_mut(&program) {
            shaders.retain(|&s| s != shader);
        }
        self.record(format!("detach_shader({program}, {shader})"));
    }

    fn link_program(&self, program: u32) {
        let ok = {
            let attached = self.attached.borrow();
            let compiled = self.compiled.borrow();
            attached.get(&program).is_some_and(|shaders| {
                !shaders.is_empty()
                    && shaders.iter().all(|s| compiled.get(s).copied().unwrap_or(false))
            })
        };
        self.linked.borrow_mut().insert(program, ok);
        self.record(format!("link_program({program})"));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.linked.borrow().get(&program).copied().unwrap_or(false)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: linking with uncompiled/unspecialized shader\n".to_string()
        }
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(format!("use_program({program:?})"));
    }

    fn delete_program(&self, program: u32) {
        self.delete("delete_program", program);
    }

    fn create_buffer(&self) -> Result<u32, String> {
        self.create("create_buffer")
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.bound_buffers.borrow_mut().insert(target, buffer);
        self.record(format!("bind_buffer({target:#06x}, {buffer:?})"));
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.uploads.borrow_mut().push((target, data.len()));
        self.record(format!("buffer_data({target:#06x}, {}, {usage:#06x})", data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.delete("delete_buffer", buffer);
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        self.create("create_vertex_array")
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.bound_vertex_array.set(vertex_array);
        self.record(format!("bind_vertex_array({vertex_array:?})"));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.delete("delete_vertex_array", vertex_array);
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(format!("enable_vertex_attrib_array({index})"));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record(format!("disable_vertex_attrib_array({index})"));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(format!(
            "vertex_attrib_pointer({index}, {size}, {data_type:#06x}, {normalized}, {stride}, {offset})"
        ));
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        self.record(format!("draw_elements({mode:#06x}, {count}, {element_type:#06x}, {offset})"));
    }

    fn uniform_matrix_4(&self, location: u32, transpose: bool, data: &[f32; 16]) {
        self.uniforms.borrow_mut().insert(location, *data);
        self.record(format!("uniform_matrix_4({location}, {transpose})"));
    }

    fn create_texture(&self) -> Result<u32, String> {
        self.create("create_texture")
    }

    fn bind_texture(&self, target: u32, texture: Option<u32>) {
        self.record(format!("bind_texture({target:#06x}, {texture:?})"));
    }

    fn active_texture(&self, unit: u32) {
        self.record(format!("active_texture({unit:#06x})"));
    }

    fn tex_storage_2d(&self, target: u32, levels: i32, internal_format: u32, width: i32, height: i32) {
        self.record(format!(
            "tex_storage_2d({target:#06x}, {levels}, {internal_format:#06x}, {width}, {height})"
        ));
    }

    fn tex_sub_image_2d(
        &self,
        target: u32,
        width: i32,
        height: i32,
        format: u32,
        data_type: u32,
        pixels: &[u8],
    ) {
        self.uploads.borrow_mut().push((target, pixels.len()));
        self.record(format!(
            "tex_sub_image_2d({target:#06x}, {width}, {height}, {format:#06x}, {data_type:#06x}, {})",
            pixels.len()
        ));
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        self.record(format!("tex_parameter_i32({target:#06x}, {parameter:#06x}, {value:#06x})"));
    }

    fn delete_texture(&self, texture: u32) {
        self.delete("delete_texture", texture);
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(format!("clear_color({r}, {g}, {b}, {a})"));
    }

    fn clear(&self, mask: u32) {
        self.record(format!("clear({mask:#06x})"));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(format!("viewport({x}, {y}, {width}, {height})"));
    }

    fn enable(&self, capability: u32) {
        self.record(format!("enable({capability:#06x})"));
    }

    fn disable(&self, capability: u32) {
        self.record(format!("disable({capability:#06x})"));
    }

    fn get_error(&self) -> u32 {
        self.pending_errors.borrow_mut().pop_front().unwrap_or(glow::NO_ERROR)
    }
}
