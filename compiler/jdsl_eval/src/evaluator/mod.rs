//! Tree-walking evaluator over decoded values.

use std::io::Read;

use jdsl_decode::{DecodeConfig, Decoder};
use jdsl_stack::ensure_sufficient_stack;
use jdsl_value::errors::{arity_mismatch, not_callable, undefined_name, unhashable_key};
use jdsl_value::{
    Arity, Builtin, Closure, EvalError, EvalResult, FunctionValue, Heap, LocalScope, Name,
    ObjectValue, Op, Scope, Value,
};
use tracing::{debug, trace};

use crate::builtins;
use crate::diagnostics::CallStack;
use crate::Error;

/// Evaluator settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum number of nested operator invocations. `None` disables
    /// the limit; stack growth still keeps deep recursion safe.
    pub max_depth: Option<usize>,
    /// Settings for decoding source handed to `eval_source`/`eval_reader`.
    pub decode: DecodeConfig,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: Some(10_000),
            decode: DecodeConfig::default(),
        }
    }
}

/// Evaluates values against a root scope.
///
/// Top-level statements act on the root scope, so `bind` at the top level
/// is visible to every later statement. Inside a closure body the acting
/// scope is the call's own frame.
pub struct Evaluator {
    scope: LocalScope<Scope>,
    config: EvalConfig,
    call_stack: CallStack,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// An evaluator over a fresh scope holding the builtins.
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self::with_scope_and_config(LocalScope::new(Scope::with_builtins()), config)
    }

    /// An evaluator acting on an existing scope. The scope is shared:
    /// binds made here are visible through every other handle to it.
    pub fn with_scope(scope: LocalScope<Scope>) -> Self {
        Self::with_scope_and_config(scope, EvalConfig::default())
    }

    pub fn with_scope_and_config(scope: LocalScope<Scope>, config: EvalConfig) -> Self {
        Evaluator {
            scope,
            call_stack: CallStack::new(config.max_depth),
            config,
        }
    }

    /// The root scope.
    pub fn scope(&self) -> &LocalScope<Scope> {
        &self.scope
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluate one value in the root scope.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn eval(&mut self, value: &Value) -> EvalResult {
        let scope = self.scope.clone();
        self.eval_in(value, &scope)
    }

    /// Evaluate and require a callable result.
    pub fn eval_callable(&mut self, value: &Value) -> Result<FunctionValue, EvalError> {
        let value = self.eval(value)?;
        value
            .as_callable()
            .cloned()
            .ok_or_else(|| not_callable(&value))
    }

    /// Decode and evaluate every statement of `source` in order.
    ///
    /// Returns the value of the last statement, `null` if there is none.
    /// The first error stops evaluation; binds made before it stay.
    pub fn eval_source(&mut self, source: &str) -> Result<Value, Error> {
        self.eval_reader(source.as_bytes())
    }

    /// Like [`eval_source`](Self::eval_source), reading from `reader`.
    pub fn eval_reader<R: Read>(&mut self, reader: R) -> Result<Value, Error> {
        let mut decoder = Decoder::with_config(reader, self.config.decode);
        let mut last = Value::Null;
        let mut index = 0usize;
        while let Some(statement) = decoder.decode()? {
            debug!(index, "evaluating statement");
            last = self.eval(&statement)?;
            index += 1;
        }
        debug!(statements = index, "source evaluated");
        Ok(last)
    }

    // Evaluation proper

    fn eval_in(&mut self, value: &Value, scope: &LocalScope<Scope>) -> EvalResult {
        match value {
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Str(_)
            | Value::Function(_) => Ok(value.clone()),
            Value::Array(items) => ensure_sufficient_stack(|| self.eval_array(items, scope)),
            Value::Object(object) => ensure_sufficient_stack(|| self.eval_object(object, scope)),
            Value::Op(op) => ensure_sufficient_stack(|| self.eval_op(op, scope)),
        }
    }

    fn eval_array(&mut self, items: &[Value], scope: &LocalScope<Scope>) -> EvalResult {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let value = self
                .eval_in(item, scope)
                .map_err(|e| e.with_context(format!("at array index {i}")))?;
            out.push(value);
        }
        Ok(Value::array(out))
    }

    fn eval_object(&mut self, object: &ObjectValue, scope: &LocalScope<Scope>) -> EvalResult {
        let mut out = ObjectValue::with_capacity(object.len());
        for (key, value) in object.iter() {
            let evaluated_key = self
                .eval_in(key, scope)
                .map_err(|e| e.with_context(format!("at object key {key}")))?;
            if !evaluated_key.is_hashable() {
                return Err(unhashable_key(&evaluated_key).with_context(format!("at object key {key}")));
            }
            let evaluated_value = self
                .eval_in(value, scope)
                .map_err(|e| e.with_context(format!("at object value {evaluated_key}")))?;
            out.insert(evaluated_key, evaluated_value);
        }
        Ok(Value::object(out))
    }

    fn eval_op(&mut self, op: &Op, scope: &LocalScope<Scope>) -> EvalResult {
        let found = scope.borrow().lookup(&op.id);
        let mut current = found.ok_or_else(|| undefined_name(&op.id))?;
        for args in &op.invocations {
            let function = current
                .as_callable()
                .cloned()
                .ok_or_else(|| not_callable(&current))?;
            current = self.invoke(&op.id, &function, args, scope)?;
        }
        Ok(current)
    }

    /// Apply `function`, named `id` at the call site, to the raw `args`.
    fn invoke(
        &mut self,
        id: &Name,
        function: &FunctionValue,
        args: &[Value],
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        self.call_stack.push()?;
        let result = ensure_sufficient_stack(|| match function {
            FunctionValue::Builtin(builtin) => self.call_builtin(id, *builtin, args, scope),
            FunctionValue::Closure(closure) => {
                let args = self.eval_args(id, args, scope)?;
                self.call_closure(closure, args)
            }
        });
        self.call_stack.pop();
        result
    }

    fn eval_args(
        &mut self,
        id: &Name,
        args: &[Value],
        scope: &LocalScope<Scope>,
    ) -> Result<Vec<Value>, EvalError> {
        args.iter()
            .enumerate()
            .map(|(i, arg)| {
                self.eval_in(arg, scope)
                    .map_err(|e| e.with_context(format!("at argument {i} of `{id}`")))
            })
            .collect()
    }

    fn call_builtin(
        &mut self,
        id: &Name,
        builtin: Builtin,
        args: &[Value],
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        let arity = builtin.arity();
        if !arity.accepts(args.len()) {
            return Err(arity_mismatch(builtin.name(), arity, args.len()));
        }
        let evaluated;
        let args = if builtin.evaluates_args() {
            evaluated = self.eval_args(id, args, scope)?;
            evaluated.as_slice()
        } else {
            args
        };
        match builtin {
            Builtin::Bind => self.bind(id, args, scope),
            Builtin::Lambda => builtins::lambda(args, scope),
            Builtin::Add => builtins::add(args),
            Builtin::Sub => builtins::sub(args),
            Builtin::Mul => builtins::mul(args),
            Builtin::Div => builtins::div(args),
            Builtin::Sum => builtins::sum(args),
            Builtin::Mean => builtins::mean(args),
        }
    }

    /// `bind(name, value)`: evaluate `value` and define it in the acting
    /// scope.
    fn bind(&mut self, id: &Name, args: &[Value], scope: &LocalScope<Scope>) -> EvalResult {
        let name = builtins::binding_name(Builtin::Bind.name(), 0, &args[0])?;
        let value = self
            .eval_in(&args[1], scope)
            .map_err(|e| e.with_context(format!("at argument 1 of `{id}`")))?;
        trace!(name = %name, value = %value, "bind");
        scope.borrow_mut().define(name, value);
        Ok(Value::Null)
    }

    /// Call a closure with evaluated arguments.
    ///
    /// A full call evaluates the body in a fresh frame over the captured
    /// scope. Fewer arguments than parameters bind what was given and
    /// return a closure expecting the rest.
    fn call_closure(&mut self, closure: &Heap<Closure>, args: Vec<Value>) -> EvalResult {
        let Some(params) = &closure.params else {
            return Ok(closure.body.clone());
        };
        let given = args.len();
        if given == 0 || given > params.len() {
            return Err(arity_mismatch("lambda", Arity::Exact(params.len()), given));
        }

        let frame = closure.captured.child();
        {
            let mut bindings = frame.borrow_mut();
            for (param, arg) in params.iter().zip(args) {
                bindings.define(param.clone(), arg);
            }
        }

        if given < params.len() {
            trace!(given, remaining = params.len() - given, "partial application");
            let rest = params[given..].to_vec();
            return Ok(Value::Function(FunctionValue::closure(
                frame,
                Some(rest),
                closure.body.clone(),
            )));
        }

        trace!(depth = self.call_stack.depth(), "closure call");
        self.eval_in(&closure.body, &frame)
    }
}
