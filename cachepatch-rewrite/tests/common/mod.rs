#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use cachepatch_ir::*;
use cachepatch_rewrite::*;

pub const STAT_FIELD: FieldRef = FieldRef(100);
pub const OTHER_FIELD: FieldRef = FieldRef(101);
pub const GET_STAT_VALUE: MethodRef = MethodRef(200);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn config() -> RewriteConfig {
    RewriteConfig::from_yaml(
        r#"
computation: MarketValue
computation_id: 7
conflicting_providers: [OtherCache]
computation_field: StatDefOf::MarketValue
compute_method: StatExtension::GetStatValue
methods:
  - Trade::Sellable
  - Trade::Price
"#,
    )
    .unwrap()
}

/// `ldarg; ldfld field; ldc 1; ldc -1; call GetStatValue; ret`
pub fn uncached_body(field: FieldRef) -> Sequence {
    Sequence::new(vec![
        Instruction::simple(Opcode::LoadArg),
        Instruction::load_field(field),
        Instruction::load_const(1),
        Instruction::load_const(-1),
        Instruction::call(GET_STAT_VALUE),
        Instruction::simple(Opcode::Return),
    ])
}

/// In-memory method bodies, recording every install.
#[derive(Default)]
pub struct FakeBodies {
    pub bodies: HashMap<MethodRef, Sequence>,
    pub installed: Vec<MethodRef>,
}

impl FakeBodies {
    pub fn with(bodies: impl IntoIterator<Item = (u32, Sequence)>) -> Self {
        FakeBodies {
            bodies: bodies
                .into_iter()
                .map(|(id, seq)| (MethodRef(id), seq))
                .collect(),
            installed: Vec::new(),
        }
    }

    pub fn body(&self, method: u32) -> &Sequence {
        &self.bodies[&MethodRef(method)]
    }
}

impl MethodBodies for FakeBodies {
    fn instruction_sequence(&self, method: MethodRef) -> Option<Sequence> {
        self.bodies.get(&method).cloned()
    }

    fn set_instruction_sequence(&mut self, method: MethodRef, seq: Sequence) {
        self.installed.push(method);
        self.bodies.insert(method, seq);
    }
}

/// Symbol table, environment and diagnostics of a fake host.
#[derive(Default)]
pub struct FakeHost {
    pub symbols: HashMap<String, u32>,
    pub features: HashSet<String>,
    pub providers: HashSet<String>,
    pub errors: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        let mut host = FakeHost::default();
        host.symbols.insert("StatDefOf::MarketValue".into(), STAT_FIELD.0);
        host.symbols.insert("StatDefOf::Beauty".into(), OTHER_FIELD.0);
        host.symbols
            .insert("StatExtension::GetStatValue".into(), GET_STAT_VALUE.0);
        host.symbols.insert("Trade::Sellable".into(), 1);
        host.symbols.insert("Trade::Price".into(), 2);
        host.features.insert("MarketValue".into());
        host
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl SymbolResolver for FakeHost {
    fn resolve_field(&self, symbol: &Symbol) -> Option<FieldRef> {
        self.symbols.get(&symbol.to_string()).map(|&id| FieldRef(id))
    }

    fn resolve_method(&self, symbol: &Symbol) -> Option<MethodRef> {
        self.symbols.get(&symbol.to_string()).map(|&id| MethodRef(id))
    }
}

impl Environment for FakeHost {
    fn is_feature_defined(&self, name: &str) -> bool {
        self.features.contains(name)
    }

    fn is_other_provider_active(&self, name: &str) -> bool {
        self.providers.contains(name)
    }
}

impl Diagnostics for FakeHost {
    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
