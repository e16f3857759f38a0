//! Models: named constants and their values, as printed by `(get-model)`.

use super::literal::{bitvector_from_sexp, integer_to_smtlib, rational_from_sexp};
use super::sexp::{self, Sexp};
use crate::bitvec::{BitVector, Bv};
use crate::rational::Rational;
use num_bigint::BigInt;
use std::collections::BTreeMap;
use std::fmt;
use zwrap_core::{ContextResult, ErrorContext, Result, ResultExt, ValueError};

/// One constant's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValue {
    /// `Bool`
    Bool(bool),
    /// `Int`
    Int(BigInt),
    /// `Real`
    Real(Rational),
    /// `(_ BitVec N)`
    BitVec(BitVector),
}

impl ModelValue {
    /// SMT-LIB sort name.
    pub fn sort(&self) -> String {
        match self {
            ModelValue::Bool(_) => "Bool".to_string(),
            ModelValue::Int(_) => "Int".to_string(),
            ModelValue::Real(_) => "Real".to_string(),
            ModelValue::BitVec(bv) => format!("(_ BitVec {})", bv.width()),
        }
    }

    /// SMT-LIB literal for the value.
    pub fn to_smtlib(&self) -> String {
        match self {
            ModelValue::Bool(b) => b.to_string(),
            ModelValue::Int(i) => integer_to_smtlib(i),
            ModelValue::Real(r) => r.to_smtlib(),
            ModelValue::BitVec(bv) => bv.to_smtlib(),
        }
    }

    /// Numeric value; integers widen to rationals.
    pub fn as_rational(&self) -> Result<Rational> {
        match self {
            ModelValue::Int(i) => Ok(Rational::from_integer(i.clone())),
            ModelValue::Real(r) => Ok(r.clone()),
            _ => Err(self.wrong_sort("Int or Real")),
        }
    }

    /// Integer value; a real must have denominator one.
    pub fn as_integer(&self) -> Result<BigInt> {
        match self {
            ModelValue::Int(i) => Ok(i.clone()),
            ModelValue::Real(r) => r.to_bigint(),
            _ => Err(self.wrong_sort("Int")),
        }
    }

    /// Bit-vector value of any width.
    pub fn as_bitvector(&self) -> Result<&BitVector> {
        match self {
            ModelValue::BitVec(bv) => Ok(bv),
            _ => Err(self.wrong_sort("(_ BitVec N)")),
        }
    }

    /// Boolean value.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            ModelValue::Bool(b) => Ok(*b),
            _ => Err(self.wrong_sort("Bool")),
        }
    }

    fn wrong_sort(&self, expected: &str) -> ValueError {
        ValueError::invalid_argument(format!(
            "Value of sort {} cannot be read as {}",
            self.sort(),
            expected
        ))
    }
}

impl fmt::Display for ModelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_smtlib())
    }
}

impl From<bool> for ModelValue {
    fn from(value: bool) -> Self {
        ModelValue::Bool(value)
    }
}

impl From<BigInt> for ModelValue {
    fn from(value: BigInt) -> Self {
        ModelValue::Int(value)
    }
}

impl From<Rational> for ModelValue {
    fn from(value: Rational) -> Self {
        ModelValue::Real(value)
    }
}

impl From<BitVector> for ModelValue {
    fn from(value: BitVector) -> Self {
        ModelValue::BitVec(value)
    }
}

impl<const N: u32> From<Bv<N>> for ModelValue {
    fn from(value: Bv<N>) -> Self {
        ModelValue::BitVec(value.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sort {
    Bool,
    Int,
    Real,
    BitVec(u32),
}

fn parse_sort(expr: &Sexp) -> Result<Sort> {
    let unknown = || ValueError::format_error(format!("Unsupported sort: {}", expr));
    match expr {
        Sexp::Atom(name) => match name.as_str() {
            "Bool" => Ok(Sort::Bool),
            "Int" => Ok(Sort::Int),
            "Real" => Ok(Sort::Real),
            _ => Err(unknown()),
        },
        Sexp::List(items) => match items.as_slice() {
            [Sexp::Atom(underscore), Sexp::Atom(bitvec), Sexp::Atom(width)]
                if underscore == "_" && bitvec == "BitVec" =>
            {
                width.parse().map(Sort::BitVec).map_err(|_| unknown())
            }
            _ => Err(unknown()),
        },
    }
}

fn parse_value(sort: Sort, expr: &Sexp) -> Result<ModelValue> {
    match sort {
        Sort::Bool => match expr.as_atom() {
            Some("true") => Ok(ModelValue::Bool(true)),
            Some("false") => Ok(ModelValue::Bool(false)),
            _ => Err(ValueError::format_error(format!(
                "Invalid Bool literal: {}",
                expr
            ))),
        },
        Sort::Int => Ok(ModelValue::Int(rational_from_sexp(expr)?.to_bigint()?)),
        Sort::Real => Ok(ModelValue::Real(rational_from_sexp(expr)?)),
        Sort::BitVec(width) => {
            let bv = bitvector_from_sexp(expr)?;
            if bv.width() != width {
                return Err(ValueError::width_mismatch(bv.width(), width));
            }
            Ok(ModelValue::BitVec(bv))
        }
    }
}

fn reading(name: &str) -> String {
    format!("while reading model value for `{}`", name)
}

fn parse_define_fun(entry: &Sexp) -> ContextResult<(String, ModelValue)> {
    let shape_error = || {
        ErrorContext::new(ValueError::format_error(format!(
            "Expected define-fun, found: {}",
            entry
        )))
        .with_suggestion("Model entries look like (define-fun <name> () <sort> <value>)")
    };

    let Sexp::List(items) = entry else {
        return Err(shape_error());
    };
    let [Sexp::Atom(head), Sexp::Atom(name), Sexp::List(params), sort, value] = items.as_slice()
    else {
        return Err(shape_error());
    };
    if head != "define-fun" {
        return Err(shape_error());
    }
    if !params.is_empty() {
        return Err(ErrorContext::new(ValueError::invalid_argument(format!(
            "Function-valued model entries are not supported: {}",
            name
        )))
        .with_context(reading(name)));
    }

    let sort = parse_sort(sort).with_context(|| reading(name))?;
    let value = parse_value(sort, value).with_context(|| reading(name))?;
    Ok((name.clone(), value))
}

/// Model entries in a parsed document: either wrapped in `(model ...)` or
/// `(...)`, or a bare sequence of `define-fun`s.
fn model_entries(mut exprs: Vec<Sexp>) -> Vec<Sexp> {
    if exprs.len() == 1
        && let Some(Sexp::List(items)) = exprs.first()
    {
        if items.first().and_then(Sexp::as_atom) == Some("model") {
            return items[1..].to_vec();
        }
        if items.iter().all(|item| matches!(item, Sexp::List(_))) {
            if let Some(Sexp::List(items)) = exprs.pop() {
                return items;
            }
        }
    }
    exprs
}

/// Named constants and their values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    values: BTreeMap<String, ModelValue>,
}

impl Model {
    /// Empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the text printed by `(get-model)`.
    pub fn parse(text: &str) -> ContextResult<Self> {
        let exprs = sexp::parse_all(text).context("while parsing model")?;
        let mut model = Model::new();
        for entry in model_entries(exprs) {
            let (name, value) = parse_define_fun(&entry)?;
            model.insert(name, value)?;
        }
        tracing::debug!(entries = model.len(), "parsed model");
        Ok(model)
    }

    /// Number of constants.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the model has no constants.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set a constant's value, returning the previous one.
    ///
    /// A name containing `|` cannot be written as an SMT-LIB symbol and is
    /// rejected with `InvalidArgument`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ModelValue>,
    ) -> Result<Option<ModelValue>> {
        let name = name.into();
        if name.contains('|') {
            return Err(ValueError::invalid_argument(format!(
                "Constant name cannot contain '|': {}",
                name
            )));
        }
        Ok(self.values.insert(name, value.into()))
    }

    /// A constant's value, if present.
    pub fn get(&self, name: &str) -> Option<&ModelValue> {
        self.values.get(name)
    }

    /// Constants in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    fn lookup(&self, name: &str) -> ContextResult<&ModelValue> {
        self.values.get(name).ok_or_else(|| {
            let err = ErrorContext::new(ValueError::invalid_argument(format!(
                "No model value for `{}`",
                name
            )));
            if self.values.is_empty() {
                err
            } else {
                let known: Vec<&str> = self.values.keys().map(String::as_str).collect();
                err.with_suggestion(format!("Known names: {}", known.join(", ")))
            }
        })
    }

    /// Boolean constant.
    pub fn boolean(&self, name: &str) -> ContextResult<bool> {
        self.lookup(name)?.as_bool().with_context(|| reading(name))
    }

    /// Integer constant (or a real with denominator one).
    pub fn integer(&self, name: &str) -> ContextResult<BigInt> {
        self.lookup(name)?.as_integer().with_context(|| reading(name))
    }

    /// Numeric constant as a rational.
    pub fn rational(&self, name: &str) -> ContextResult<Rational> {
        self.lookup(name)?.as_rational().with_context(|| reading(name))
    }

    /// Bit-vector constant of any width.
    pub fn bitvector(&self, name: &str) -> ContextResult<BitVector> {
        self.lookup(name)?
            .as_bitvector()
            .cloned()
            .with_context(|| reading(name))
    }

    /// Bit-vector constant whose width must be `N`.
    pub fn bv<const N: u32>(&self, name: &str) -> ContextResult<Bv<N>> {
        let value = self.lookup(name)?.as_bitvector().with_context(|| reading(name))?;
        Bv::try_from(value).with_context(|| reading(name))
    }

    /// Print as a `(model ...)` block.
    pub fn to_smtlib(&self) -> String {
        let mut lines = vec!["(model".to_string()];
        for (name, value) in &self.values {
            lines.push(format!(
                "  (define-fun {} () {} {})",
                symbol_to_smtlib(name),
                value.sort(),
                value.to_smtlib()
            ));
        }
        lines.push(")".to_string());
        lines.join("\n")
    }
}

/// Names that would not read back as a single atom are `|quoted|`.
fn symbol_to_smtlib(name: &str) -> String {
    let plain = !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ';' | '|'));
    if plain {
        name.to_string()
    } else {
        format!("|{name}|")
    }
}
