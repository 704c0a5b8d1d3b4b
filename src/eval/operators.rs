//! The built-in operator table

use super::{EvalError, Interpreter};
use std::collections::HashMap;

/// A built-in: receives the interpreter, reports success or a typed failure
pub type Operator = fn(&mut Interpreter) -> Result<(), EvalError>;

/// Name to operator mapping, filled once when the interpreter is created
#[derive(Clone)]
pub struct OperatorTable {
    ops: HashMap<&'static str, Operator>,
}

impl OperatorTable {
    pub fn empty() -> Self {
        OperatorTable {
            ops: HashMap::new(),
        }
    }

    /// Every built-in operator
    pub fn standard() -> Self {
        let mut table = Self::empty();

        // Arithmetic
        table.register("add", Interpreter::op_add);
        table.register("sub", Interpreter::op_sub);
        table.register("mul", Interpreter::op_mul);
        table.register("div", Interpreter::op_div);
        table.register("idiv", Interpreter::op_idiv);
        table.register("mod", Interpreter::op_mod);
        table.register("abs", Interpreter::op_abs);
        table.register("neg", Interpreter::op_neg);
        table.register("sqrt", Interpreter::op_sqrt);
        table.register("ceiling", Interpreter::op_ceiling);
        table.register("floor", Interpreter::op_floor);
        table.register("round", Interpreter::op_round);

        // Comparison and boolean
        table.register("eq", Interpreter::op_eq);
        table.register("ne", Interpreter::op_ne);
        table.register("gt", Interpreter::op_gt);
        table.register("ge", Interpreter::op_ge);
        table.register("lt", Interpreter::op_lt);
        table.register("le", Interpreter::op_le);
        table.register("and", Interpreter::op_and);
        table.register("or", Interpreter::op_or);
        table.register("not", Interpreter::op_not);
        table.register("true", Interpreter::op_true);
        table.register("false", Interpreter::op_false);

        // Stack
        table.register("dup", Interpreter::op_dup);
        table.register("pop", Interpreter::op_pop);
        table.register("exch", Interpreter::op_exch);
        table.register("clear", Interpreter::op_clear);
        table.register("count", Interpreter::op_count);

        // Dictionary
        table.register("dict", Interpreter::op_dict);
        table.register("begin", Interpreter::op_begin);
        table.register("end", Interpreter::op_end);
        table.register("def", Interpreter::op_def);
        table.register("length", Interpreter::op_length);
        table.register("maxlength", Interpreter::op_maxlength);

        // Flow control
        table.register("if", Interpreter::op_if);
        table.register("ifelse", Interpreter::op_ifelse);
        table.register("for", Interpreter::op_for);
        table.register("repeat", Interpreter::op_repeat);
        table.register("exec", Interpreter::op_exec);
        table.register("quit", Interpreter::op_quit);

        // Strings
        table.register("get", Interpreter::op_get);
        table.register("getinterval", Interpreter::op_getinterval);
        table.register("putinterval", Interpreter::op_putinterval);

        // Output
        table.register("print", Interpreter::op_print);
        table.register("=", Interpreter::op_print_value);
        table.register("==", Interpreter::op_print_repr);

        table
    }

    pub fn register(&mut self, name: &'static str, op: Operator) {
        self.ops.insert(name, op);
    }

    pub fn get(&self, name: &str) -> Option<Operator> {
        self.ops.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Sorted operator names
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.ops.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
