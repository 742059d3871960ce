//! In-memory driver that records every call and imitates a GLSL front end
//! closely enough to exercise the compile and link paths.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use super::driver::{ShaderDriver, StringQuery};
use super::shaders::ShaderStage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    GetString(StringQuery),
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    ShaderInfoLog(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    ProgramInfoLog(u32),
    DeleteProgram(u32),
}

struct MockShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Default)]
struct MockProgram {
    attached: Vec<u32>,
    linked: bool,
    log: String,
}

#[derive(Default)]
struct State {
    next_id: u32,
    shaders: BTreeMap<u32, MockShader>,
    programs: BTreeMap<u32, MockProgram>,
    last_program: Option<u32>,
    calls: Vec<Call>,
    refuse_shaders: bool,
    refuse_programs: bool,
}

impl State {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

pub(crate) struct MockDriver {
    state: RefCell<State>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State::default()),
        }
    }

    pub fn refuse_object_creation(&self) {
        self.state.borrow_mut().refuse_shaders = true;
    }

    pub fn refuse_program_creation(&self) {
        self.state.borrow_mut().refuse_programs = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn shader_source_of(&self, shader: u32) -> Option<String> {
        self.state.borrow().shaders.get(&shader).map(|s| s.source.clone())
    }

    pub fn shader_alive(&self, shader: u32) -> bool {
        self.state.borrow().shaders.contains_key(&shader)
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn last_program(&self) -> Option<u32> {
        self.state.borrow().last_program
    }

    pub fn attached_to(&self, program: u32) -> Vec<u32> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.attached.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

/// Position in the graphics pipeline; compute sorts last.
fn pipeline_order(stage: ShaderStage) -> u8 {
    match stage {
        ShaderStage::Vertex => 0,
        ShaderStage::TessControl => 1,
        ShaderStage::TessEvaluation => 2,
        ShaderStage::Geometry => 3,
        ShaderStage::Fragment => 4,
        ShaderStage::Compute => 5,
    }
}

fn check_syntax(source: &str) -> Result<(), String> {
    let mut depth: i32 = 0;
    for (line_no, line) in source.lines().enumerate() {
        if line.trim_start().starts_with("#error") {
            return Err(format!("0:{}(1): error: {}", line_no + 1, line.trim()));
        }
        for ch in line.chars() {
            match ch {
                '{' | '(' => depth += 1,
                '}' | ')' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return Err(format!(
                    "0:{}(1): error: syntax error, unexpected '{}'",
                    line_no + 1,
                    ch
                ));
            }
        }
    }
    if depth != 0 {
        let last = source.lines().count();
        return Err(format!("0:{}(1): error: syntax error, unexpected end of file", last));
    }
    Ok(())
}

/// Names declared with the given storage qualifier (`in`/`out`) at the
/// start of a line, with array suffixes stripped.
fn interface_names(source: &str, qualifier: &str) -> HashSet<String> {
    source
        .lines()
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if !tokens.contains(&qualifier) || tokens.contains(&"uniform") {
                return None;
            }
            let name = tokens.last()?.trim_end_matches(';');
            let name = name.split('[').next().unwrap_or(name);
            Some(name.to_string())
        })
        .collect()
}

impl ShaderDriver for MockDriver {
    type Shader = u32;
    type Program = u32;

    fn get_string(&self, query: StringQuery) -> String {
        self.record(Call::GetString(query));
        match query {
            StringQuery::Vendor => "Mock Vendor".into(),
            StringQuery::Renderer => "Mock Renderer 9000".into(),
            StringQuery::Version => "3.3.0 Mock".into(),
            StringQuery::ShadingLanguageVersion => "3.30 Mock".into(),
        }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        if state.refuse_shaders {
            return Err("GL_INVALID_OPERATION".into());
        }
        let id = state.next_id();
        state.shaders.insert(
            id,
            MockShader {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        state.calls.push(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::ShaderSource(shader));
        if let Some(s) = state.shaders.get_mut(&shader) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::CompileShader(shader));
        if let Some(s) = state.shaders.get_mut(&shader) {
            match check_syntax(&s.source) {
                Ok(()) => {
                    s.compiled = true;
                    s.log.clear();
                }
                Err(log) => {
                    s.compiled = false;
                    s.log = log;
                }
            }
        }
    }

    fn compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|s| s.compiled)
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::ShaderInfoLog(shader));
        state
            .shaders
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::DeleteShader(shader));
        state.shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        if state.refuse_programs {
            return Err("GL_OUT_OF_MEMORY".into());
        }
        let id = state.next_id();
        state.programs.insert(id, MockProgram::default());
        state.last_program = Some(id);
        state.calls.push(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::AttachShader(program, shader));
        if let Some(p) = state.programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::DetachShader(program, shader));
        if let Some(p) = state.programs.get_mut(&program) {
            p.attached.retain(|&s| s != shader);
        }
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::LinkProgram(program));
        let attached = match state.programs.get(&program) {
            Some(p) => p.attached.clone(),
            None => return,
        };

        let mut stages: Vec<&MockShader> =
            attached.iter().filter_map(|id| state.shaders.get(id)).collect();
        stages.sort_by_key(|s| pipeline_order(s.stage));

        let mut errors = Vec::new();
        if stages.is_empty() {
            errors.push("error: no shaders attached to the program".to_string());
        }
        if stages.iter().any(|s| !s.compiled) {
            errors.push("error: linking with uncompiled shader".to_string());
        }
        for pair in stages.windows(2) {
            let outputs = interface_names(&pair[0].source, "out");
            let mut inputs: Vec<_> = interface_names(&pair[1].source, "in").into_iter().collect();
            inputs.sort();
            for input in inputs {
                if !outputs.contains(&input) {
                    errors.push(format!(
                        "error: {} shader input `{}' has no matching output in the {} shader",
                        pair[1].stage, input, pair[0].stage
                    ));
                }
            }
        }

        if let Some(p) = state.programs.get_mut(&program) {
            p.linked = errors.is_empty();
            p.log = errors.join("\n");
        }
    }

    fn link_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.linked)
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::ProgramInfoLog(program));
        state
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::DeleteProgram(program));
        state.programs.remove(&program);
    }

    fn is_program(&self, program: u32) -> bool {
        self.state.borrow().programs.contains_key(&program)
    }
}
