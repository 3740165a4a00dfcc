//! The tree-walking evaluator.

use salt_par::{ArithOp, CompareOp, Expr, LogicalOp, LoopForm, NumberLiteral, Stmt, TypeName};
use salt_util::{SaltError, SaltResult};

use crate::coerce::coerce;
use crate::environment::{Environment, FunctionDef, FunctionTable};
use crate::output::OutputSink;
use crate::value::{Array, Value};

/// The result of executing a statement: either normal fall-through, or
/// one of the three control-flow markers propagating outward.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Skip,
    End,
    Return(Value),
}

pub struct Evaluator<'a> {
    env: Environment,
    functions: FunctionTable,
    sink: &'a mut dyn OutputSink,
}

impl<'a> Evaluator<'a> {
    pub fn new(sink: &'a mut dyn OutputSink) -> Self {
        Self { env: Environment::new(), functions: FunctionTable::new(), sink }
    }

    /// Runs a full program. A `skip`/`end`/`give` reaching the top level
    /// is an error: there is no enclosing loop or function to catch it.
    pub fn run(&mut self, program: &[Stmt]) -> SaltResult<()> {
        tracing::debug!(statements = program.len(), "entering global scope");
        let flow = self.exec_block(program)?;
        tracing::debug!("leaving global scope");
        match flow {
            Flow::Normal => Ok(()),
            Flow::Skip | Flow::End => {
                Err(SaltError::parse("'skip'/'end' used outside of a loop"))
            }
            Flow::Return(_) => Err(SaltError::parse("'give' used outside of a function")),
        }
    }

    fn exec_block(&mut self, statements: &[Stmt]) -> SaltResult<Flow> {
        for statement in statements {
            match self.exec_stmt(statement)? {
                Flow::Normal => continue,
                other => return Ok(other),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> SaltResult<Flow> {
        match stmt {
            Stmt::Declaration { type_name, name, value } => {
                self.exec_declaration(*type_name, name, value)
            }
            Stmt::Assignment { name, value } => self.exec_assignment(name, value),
            Stmt::ArrayDeclaration { element_type, name, size } => {
                self.exec_array_declaration(*element_type, name, size)
            }
            Stmt::ArrayElementAssignment { name, index, value } => {
                self.exec_array_element_assignment(name, index, value)
            }
            Stmt::Print { arguments } => self.exec_print(arguments),
            Stmt::If { condition, then_block, else_block } => {
                if self.eval_expr(condition)?.is_truthy() {
                    self.exec_block(then_block)
                } else if let Some(else_block) = else_block {
                    self.exec_block(else_block)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::For { form, body } => self.exec_for(form, body),
            Stmt::While { condition, body } => self.exec_while(condition, body),
            Stmt::Skip => Ok(Flow::Skip),
            Stmt::End => Ok(Flow::End),
            Stmt::FunctionDefinition { name, return_type, parameters, body } => {
                self.functions.define(
                    name.clone(),
                    FunctionDef {
                        return_type: *return_type,
                        parameters: parameters.clone(),
                        body: body.clone(),
                    },
                );
                Ok(Flow::Normal)
            }
            Stmt::Return(expr) => Ok(Flow::Return(self.eval_expr(expr)?)),
            Stmt::Expression(expr) => {
                self.eval_expr(expr)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn exec_declaration(&mut self, type_name: TypeName, name: &str, value: &Expr) -> SaltResult<Flow> {
        if self.env.is_declared(name) {
            return Err(SaltError::name(format!("variable '{name}' is already declared")));
        }
        let evaluated = self.eval_expr(value)?;
        let coerced = coerce(&evaluated, type_name)?;
        self.env.declare(name.to_string(), coerced);
        Ok(Flow::Normal)
    }

    fn exec_assignment(&mut self, name: &str, value: &Expr) -> SaltResult<Flow> {
        let target_type = match self.env.get(name) {
            None => return Err(SaltError::name(format!("variable '{name}' is not defined"))),
            Some(Value::Array(_)) => {
                return Err(SaltError::type_error(format!(
                    "'{name}' is an array; use an indexed assignment"
                )))
            }
            Some(current) => scalar_type_of(current),
        };
        let evaluated = self.eval_expr(value)?;
        let coerced = coerce(&evaluated, target_type)?;
        self.env.set(name, coerced);
        Ok(Flow::Normal)
    }

    fn exec_array_declaration(
        &mut self,
        element_type: TypeName,
        name: &str,
        size: &Expr,
    ) -> SaltResult<Flow> {
        if self.env.is_declared(name) {
            return Err(SaltError::name(format!("variable '{name}' is already declared")));
        }
        let size = match self.eval_expr(size)? {
            Value::Int(n) if n > 0 => n as usize,
            Value::Int(_) => {
                return Err(SaltError::type_error("array size must be a positive integer"))
            }
            _ => return Err(SaltError::type_error("array size must be a positive integer")),
        };
        let elements = vec![Value::default_for_type(element_type); size];
        self.env.declare(name.to_string(), Value::Array(Array { element_type, elements }));
        Ok(Flow::Normal)
    }

    fn exec_array_element_assignment(
        &mut self,
        name: &str,
        index: &Expr,
        value: &Expr,
    ) -> SaltResult<Flow> {
        let element_type = match self.env.get(name) {
            None => return Err(SaltError::name(format!("variable '{name}' is not defined"))),
            Some(Value::Array(array)) => array.element_type,
            Some(_) => return Err(SaltError::type_error(format!("'{name}' is not an array"))),
        };
        let index = self.eval_index(index)?;

        let array_len = match self.env.get(name) {
            Some(Value::Array(array)) => array.elements.len(),
            _ => unreachable!("checked above that '{name}' is a declared array"),
        };
        if index >= array_len {
            return Err(SaltError::index(format!(
                "index {index} out of bounds for array '{name}' of size {array_len}"
            )));
        }

        let evaluated = self.eval_expr(value)?;
        let coerced = coerce(&evaluated, element_type)?;

        let Some(Value::Array(array)) = self.env.get_mut(name) else {
            unreachable!("checked above that '{name}' is a declared array")
        };
        array.elements[index] = coerced;
        Ok(Flow::Normal)
    }

    fn exec_print(&mut self, arguments: &[Expr]) -> SaltResult<Flow> {
        let mut line = String::new();
        for argument in arguments {
            line.push_str(&self.eval_expr(argument)?.to_display_string());
        }
        self.sink.emit_line(&line);
        Ok(Flow::Normal)
    }

    fn exec_for(&mut self, form: &LoopForm, body: &[Stmt]) -> SaltResult<Flow> {
        match form {
            LoopForm::Count { count } => {
                for _ in 0..(*count).max(0) {
                    match self.exec_block(body)? {
                        Flow::Normal | Flow::Skip => continue,
                        Flow::End => break,
                        Flow::Return(v) => return Ok(Flow::Return(v)),
                    }
                }
                Ok(Flow::Normal)
            }
            LoopForm::Range { var, start, end, step } => {
                match self.env.get(var) {
                    None => {
                        return Err(SaltError::name(format!(
                            "loop variable '{var}' is not declared"
                        )))
                    }
                    Some(Value::Int(_)) => {}
                    Some(_) => {
                        return Err(SaltError::type_error(format!(
                            "loop variable '{var}' must be an int"
                        )))
                    }
                }
                if *step == 0 {
                    return Err(SaltError::arithmetic("loop step cannot be zero"));
                }
                let mut i = *start;
                loop {
                    if i > *end {
                        break;
                    }
                    self.env.set(var, Value::Int(i));
                    match self.exec_block(body)? {
                        Flow::Normal | Flow::Skip => {}
                        Flow::End => break,
                        Flow::Return(v) => return Ok(Flow::Return(v)),
                    }
                    i += step;
                }
                Ok(Flow::Normal)
            }
        }
    }

    fn exec_while(&mut self, condition: &Expr, body: &[Stmt]) -> SaltResult<Flow> {
        loop {
            if !self.eval_expr(condition)?.is_truthy() {
                break;
            }
            match self.exec_block(body)? {
                Flow::Normal | Flow::Skip => continue,
                Flow::End => break,
                Flow::Return(v) => return Ok(Flow::Return(v)),
            }
        }
        Ok(Flow::Normal)
    }

    fn eval_index(&mut self, index: &Expr) -> SaltResult<usize> {
        match self.eval_expr(index)? {
            Value::Int(n) if n >= 0 => Ok(n as usize),
            Value::Int(n) => Err(SaltError::index(format!("negative array index {n}"))),
            _ => Err(SaltError::type_error("array index must be an integer")),
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> SaltResult<Value> {
        match expr {
            Expr::Number(NumberLiteral::Int(n)) => Ok(Value::Int(*n)),
            Expr::Number(NumberLiteral::Double(d)) => Ok(Value::Double(*d)),
            Expr::StringLit(s) => Ok(Value::String(s.clone())),
            Expr::Boolean(b) => Ok(Value::Bool(*b)),
            Expr::Variable(name) => self
                .env
                .get(name)
                .cloned()
                .ok_or_else(|| SaltError::name(format!("variable '{name}' is not defined"))),
            Expr::BinaryOp { left, op, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                apply_arith(left, *op, right)
            }
            Expr::UnaryMinus(operand) => match self.eval_expr(operand)? {
                Value::Int(n) => Ok(Value::Int(-n)),
                Value::Double(d) => Ok(Value::Double(-d)),
                other => Err(SaltError::type_error(format!(
                    "unary '-' expects a number, got {}",
                    other.type_name()
                ))),
            },
            Expr::Comparison { left, op, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                apply_compare(&left, *op, &right)
            }
            Expr::Logical { left, op, right } => {
                let left = self.eval_expr(left)?.is_truthy();
                let right = self.eval_expr(right)?.is_truthy();
                let result = match op {
                    LogicalOp::And => left && right,
                    LogicalOp::Or => left || right,
                };
                Ok(Value::Bool(result))
            }
            Expr::Not(operand) => Ok(Value::Bool(!self.eval_expr(operand)?.is_truthy())),
            Expr::ArrayAccess { name, index } => {
                match self.env.get(name) {
                    None => return Err(SaltError::name(format!("variable '{name}' is not defined"))),
                    Some(Value::Array(_)) => {}
                    Some(_) => return Err(SaltError::type_error(format!("'{name}' is not an array"))),
                }
                let idx = self.eval_index(index)?;
                let Some(Value::Array(array)) = self.env.get(name) else {
                    unreachable!("checked above that '{name}' is a declared array")
                };
                array.elements.get(idx).cloned().ok_or_else(|| {
                    SaltError::index(format!(
                        "index {idx} out of bounds for array '{name}' of size {}",
                        array.elements.len()
                    ))
                })
            }
            Expr::FunctionCall { name, arguments } => self.eval_function_call(name, arguments),
        }
    }

    fn eval_function_call(&mut self, name: &str, arguments: &[Expr]) -> SaltResult<Value> {
        tracing::debug!(function = name, arguments = arguments.len(), "calling function");
        let def = self
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| SaltError::name(format!("function '{name}' is not defined")))?;

        if arguments.len() != def.parameters.len() {
            return Err(SaltError::arity(format!(
                "function '{name}' expects {} argument(s), got {}",
                def.parameters.len(),
                arguments.len()
            )));
        }

        let mut bindings = Vec::with_capacity(arguments.len());
        for (param, argument) in def.parameters.iter().zip(arguments) {
            let evaluated = self.eval_expr(argument)?;
            let coerced = coerce(&evaluated, param.type_name)?;
            bindings.push((param.name.clone(), coerced));
        }

        tracing::trace!(function = name, "entering function scope");
        let caller_env = std::mem::replace(&mut self.env, Environment::new());
        let mut callee_env = caller_env.snapshot();
        for (name, value) in bindings {
            callee_env.declare(name, value);
        }
        self.env = callee_env;

        let result = self.exec_block(&def.body);
        self.env = caller_env;
        tracing::trace!(function = name, "leaving function scope");

        match result? {
            Flow::Return(value) => coerce(&value, def.return_type),
            Flow::Normal => Ok(Value::Unit),
            Flow::Skip | Flow::End => Err(SaltError::parse(format!(
                "'skip'/'end' used outside of a loop in function '{name}'"
            ))),
        }
    }
}

fn scalar_type_of(value: &Value) -> TypeName {
    match value {
        Value::Int(_) => TypeName::Int,
        Value::Double(_) => TypeName::Double,
        Value::Bool(_) => TypeName::Bool,
        Value::String(_) => TypeName::String,
        Value::Array(_) | Value::Unit => unreachable!("arrays and unit are never assignment targets"),
    }
}

fn is_numeric(value: &Value) -> bool {
    matches!(value, Value::Int(_) | Value::Double(_))
}

fn apply_arith(left: Value, op: ArithOp, right: Value) -> SaltResult<Value> {
    if op == ArithOp::Add && (matches!(left, Value::String(_)) || matches!(right, Value::String(_))) {
        return Ok(Value::String(format!(
            "{}{}",
            left.to_display_string(),
            right.to_display_string()
        )));
    }

    if !is_numeric(&left) || !is_numeric(&right) {
        return Err(SaltError::type_error(format!(
            "arithmetic operator expects numbers, got {} and {}",
            left.type_name(),
            right.type_name()
        )));
    }

    match op {
        ArithOp::Add => Ok(numeric_promote(left, right, |a, b| a + b, |a, b| a + b)),
        ArithOp::Sub => Ok(numeric_promote(left, right, |a, b| a - b, |a, b| a - b)),
        ArithOp::Mul => Ok(numeric_promote(left, right, |a, b| a * b, |a, b| a * b)),
        ArithOp::Div => {
            let (l, r) = (as_f64(&left), as_f64(&right));
            if r == 0.0 {
                return Err(SaltError::arithmetic("division by zero"));
            }
            Ok(Value::Double(l / r))
        }
        ArithOp::Mod => match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => {
                if *b == 0 {
                    return Err(SaltError::arithmetic("modulo by zero"));
                }
                Ok(Value::Int(a % b))
            }
            _ => {
                let (l, r) = (as_f64(&left), as_f64(&right));
                if r == 0.0 {
                    return Err(SaltError::arithmetic("modulo by zero"));
                }
                Ok(Value::Double(l % r))
            }
        },
    }
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Int(n) => *n as f64,
        Value::Double(d) => *d,
        _ => unreachable!("as_f64 only called on numeric values"),
    }
}

fn numeric_promote(left: Value, right: Value, int_op: fn(i64, i64) -> i64, float_op: fn(f64, f64) -> f64) -> Value {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Value::Int(int_op(a, b)),
        (left, right) => Value::Double(float_op(as_f64(&left), as_f64(&right))),
    }
}

fn apply_compare(left: &Value, op: CompareOp, right: &Value) -> SaltResult<Value> {
    use std::cmp::Ordering;

    let ordering: Option<Ordering> = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (l, r) if is_numeric(l) && is_numeric(r) => as_f64(l).partial_cmp(&as_f64(r)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Array(a), Value::Array(b)) => {
            return match op {
                CompareOp::Eq => Ok(Value::Bool(a == b)),
                CompareOp::Neq => Ok(Value::Bool(a != b)),
                _ => Err(SaltError::type_error("arrays do not support ordering comparisons")),
            }
        }
        (l, r) => {
            return Err(SaltError::type_error(format!(
                "cannot compare {} and {}",
                l.type_name(),
                r.type_name()
            )))
        }
    };

    let ordering = ordering
        .ok_or_else(|| SaltError::type_error("cannot compare NaN"))?;
    let result = match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Neq => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Lteq => ordering != Ordering::Greater,
        CompareOp::Gteq => ordering != Ordering::Less,
    };
    Ok(Value::Bool(result))
}
