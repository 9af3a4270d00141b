use std::rc::Rc;

use super::cache::ResourceCache;

/// Programmable pipeline stage a shader is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessellationEvaluation,
    TessellationControl,
    Compute,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 6] = [
        ShaderStage::Vertex,
        ShaderStage::Fragment,
        ShaderStage::Geometry,
        ShaderStage::TessellationEvaluation,
        ShaderStage::TessellationControl,
        ShaderStage::Compute,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex shader",
            ShaderStage::Fragment => "fragment shader",
            ShaderStage::Geometry => "geometry shader",
            ShaderStage::TessellationEvaluation => "tessellation evaluation shader",
            ShaderStage::TessellationControl => "tessellation control shader",
            ShaderStage::Compute => "compute shader",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Named shaders, one cache per stage, plus linked programs.
///
/// `S` is the backend's shader handle and `P` its program (pipeline) handle. Each
/// stage has its own key namespace.
#[derive(Debug)]
pub struct ShaderStore<S, P> {
    shaders: [ResourceCache<S>; 6],
    programs: ResourceCache<P>,
}

impl<S, P> ShaderStore<S, P> {
    pub fn new() -> Self {
        Self {
            shaders: ShaderStage::ALL.map(|stage| ResourceCache::new(stage.label())),
            programs: ResourceCache::new("program"),
        }
    }

    #[inline]
    pub fn shaders(&self, stage: ShaderStage) -> &ResourceCache<S> {
        &self.shaders[stage.index()]
    }

    #[inline]
    pub fn shaders_mut(&mut self, stage: ShaderStage) -> &mut ResourceCache<S> {
        &mut self.shaders[stage.index()]
    }

    #[inline]
    pub fn programs(&self) -> &ResourceCache<P> {
        &self.programs
    }

    #[inline]
    pub fn programs_mut(&mut self) -> &mut ResourceCache<P> {
        &mut self.programs
    }

    // ── shaders ───────────────────────────────────────────────────────────

    pub fn shader_exists(&self, stage: ShaderStage, key: &str) -> bool {
        self.shaders(stage).exists(key)
    }

    pub fn get_shader(&self, stage: ShaderStage, key: &str) -> Option<Rc<S>> {
        self.shaders(stage).get(key)
    }

    pub fn register_shader(
        &mut self,
        stage: ShaderStage,
        key: impl Into<String>,
        shader: impl Into<Rc<S>>,
    ) -> bool {
        self.shaders_mut(stage).register(key, shader)
    }

    pub fn delete_shader(&mut self, stage: ShaderStage, key: &str) -> bool {
        self.shaders_mut(stage).delete(key)
    }

    // ── programs ──────────────────────────────────────────────────────────

    pub fn program_exists(&self, key: &str) -> bool {
        self.programs.exists(key)
    }

    pub fn get_program(&self, key: &str) -> Option<Rc<P>> {
        self.programs.get(key)
    }

    pub fn register_program(&mut self, key: impl Into<String>, program: impl Into<Rc<P>>) -> bool {
        self.programs.register(key, program)
    }

    pub fn delete_program(&mut self, key: &str) -> bool {
        self.programs.delete(key)
    }
}

impl<S, P> Default for ShaderStore<S, P> {
    fn default() -> Self {
        Self::new()
    }
}
