//! Line-oriented instruction format
//!
//! ```text
//! # comments run to end of line
//! circuit(3, 2)
//! gate(h, [0])
//! gate(cx, [0, 1])
//! gate(rz, [2], [0.125])
//! measure(0, 0)
//! if(c[0]=1) gate(x, [2])
//! ```
//!
//! Each leading `c` of a gate name adds one control; controls are listed
//! before targets. A custom matrix is written as `unitary` with its entries
//! flattened row-major as interleaved real/imaginary parameters. Floats are
//! printed in shortest round-trip form, so parsing reproduces the exact
//! operation sequence.

use crate::operation::{ClassicalCondition, Operation};
use crate::{Circuit, ClbitId, Gate, QuantumError, QubitId, Result};
use std::fmt::Write as _;
use tracing::debug;

impl Circuit {
    /// Render as an instruction list
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "circuit({}, {})", self.num_qubits(), self.num_clbits());
        for op in self.operations() {
            match op {
                Operation::Gate(gate) => write_gate(&mut out, gate),
                Operation::Measure { qubit, clbit } => {
                    let _ = write!(out, "measure({}, {})", qubit.index(), clbit.index());
                },
                Operation::Conditional { gate, condition } => {
                    out.push_str("if(");
                    for (i, &(clbit, value)) in condition.terms().iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        let _ = write!(out, "c[{}]={}", clbit.index(), u8::from(value));
                    }
                    out.push_str(") ");
                    write_gate(&mut out, gate);
                },
            }
            out.push('\n');
        }
        out
    }

    /// Parse an instruction list
    ///
    /// Every instruction is validated as if appended by hand; errors carry
    /// the 1-based line number.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut circuit: Option<Circuit> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let content = raw.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }

            let mut cursor = Cursor::new(content, line);
            let keyword = cursor.ident()?;

            if keyword == "circuit" {
                if circuit.is_some() {
                    return Err(QuantumError::parse(line, "duplicate circuit header"));
                }
                cursor.expect('(')?;
                let num_qubits = cursor.usize()?;
                cursor.expect(',')?;
                let num_clbits = cursor.usize()?;
                cursor.expect(')')?;
                cursor.finish()?;
                circuit = Some(
                    Circuit::new(num_qubits, num_clbits)
                        .map_err(|e| QuantumError::parse(line, e.to_string()))?,
                );
                continue;
            }

            let target = circuit
                .as_mut()
                .ok_or_else(|| QuantumError::parse(line, "instruction before circuit header"))?;
            let operation = parse_operation(keyword, &mut cursor)?;
            cursor.finish()?;
            target
                .append(operation)
                .map_err(|e| QuantumError::parse(line, e.to_string()))?;
        }

        let circuit = circuit.ok_or_else(|| QuantumError::parse(0, "missing circuit header"))?;
        debug!(
            num_qubits = circuit.num_qubits(),
            num_clbits = circuit.num_clbits(),
            operations = circuit.len(),
            "parsed circuit text"
        );
        Ok(circuit)
    }
}

fn write_gate(out: &mut String, gate: &Gate) {
    let _ = write!(out, "gate({}, [", gate.name());
    for (i, q) in gate.qubits().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", q.index());
    }
    out.push(']');
    let params = gate.kind().params();
    if !params.is_empty() {
        out.push_str(", [");
        for (i, p) in params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{:?}", p);
        }
        out.push(']');
    }
    out.push(')');
}

fn parse_operation(keyword: &str, cursor: &mut Cursor<'_>) -> Result<Operation> {
    match keyword {
        "measure" => {
            cursor.expect('(')?;
            let qubit = cursor.usize()?;
            cursor.expect(',')?;
            let clbit = cursor.usize()?;
            cursor.expect(')')?;
            Ok(Operation::measure(qubit, clbit))
        },
        "gate" => Ok(Operation::Gate(parse_gate(cursor)?)),
        "if" => {
            cursor.expect('(')?;
            let mut terms = Vec::new();
            loop {
                let reg = cursor.ident()?;
                if reg != "c" {
                    return Err(cursor.error(format!("expected c[<bit>], found '{}'", reg)));
                }
                cursor.expect('[')?;
                let clbit = cursor.usize()?;
                cursor.expect(']')?;
                cursor.expect('=')?;
                let value = match cursor.usize()? {
                    0 => false,
                    1 => true,
                    other => return Err(cursor.error(format!("bit value must be 0 or 1, got {}", other))),
                };
                terms.push((ClbitId::new(clbit), value));
                if !cursor.eat(',') {
                    break;
                }
            }
            cursor.expect(')')?;
            let keyword = cursor.ident()?;
            if keyword != "gate" {
                return Err(cursor.error(format!("expected gate after condition, found '{}'", keyword)));
            }
            Ok(Operation::Conditional {
                gate: parse_gate(cursor)?,
                condition: ClassicalCondition::from_terms(terms),
            })
        },
        other => Err(cursor.error(format!("unknown instruction '{}'", other))),
    }
}

fn parse_gate(cursor: &mut Cursor<'_>) -> Result<Gate> {
    cursor.expect('(')?;
    let name = cursor.ident()?;
    cursor.expect(',')?;
    let qubits = cursor.list(Cursor::usize)?;
    let params = if cursor.eat(',') {
        cursor.list(Cursor::f64)?
    } else {
        Vec::new()
    };
    cursor.expect(')')?;

    let qubits: Vec<QubitId> = qubits.into_iter().map(QubitId::new).collect();
    Gate::from_name(name, &qubits, &params).map_err(|e| cursor.error(e.to_string()))
}

/// Minimal tokenizer over one instruction line
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str, line: usize) -> Self {
        Self { src, pos: 0, line }
    }

    fn error(&self, reason: impl Into<String>) -> QuantumError {
        QuantumError::parse(self.line, reason)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.eat(c) {
            return Ok(());
        }
        let found = self.rest().chars().next();
        Err(self.error(match found {
            Some(f) => format!("expected '{}', found '{}'", c, f),
            None => format!("expected '{}', found end of line", c),
        }))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        self.skip_ws();
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn ident(&mut self) -> Result<&'a str> {
        let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if word.is_empty() || word.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error("expected identifier"));
        }
        Ok(word)
    }

    fn usize(&mut self) -> Result<usize> {
        let token = self.take_while(|c| c.is_ascii_digit());
        token
            .parse()
            .map_err(|_| self.error(format!("expected integer, found '{}'", token)))
    }

    fn f64(&mut self) -> Result<f64> {
        let token = self.take_while(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
        token
            .parse()
            .map_err(|_| self.error(format!("expected number, found '{}'", token)))
    }

    /// `[a, b, ...]`, possibly empty
    fn list<T>(&mut self, mut item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        self.expect('[')?;
        let mut items = Vec::new();
        if self.eat(']') {
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if self.eat(']') {
                return Ok(items);
            }
            self.expect(',')?;
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.skip_ws();
        if self.pos < self.src.len() {
            return Err(self.error(format!("unexpected trailing input '{}'", self.rest())));
        }
        Ok(())
    }
}
