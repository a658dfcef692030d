//! The regex state machine that drives every lexer in this crate.
//!
//! A lexer is described by a static [`MachineDef`]: a set of named states, each holding an ordered list of rules. At every
//! position the first rule of the state on top of the stack that matches wins, emits its tokens and optionally moves the
//! state stack. The definition is checked and compiled once into a [`Machine`], which then hands out [`RegexLexer`]
//! iterators over borrowed input.

use std::collections::{HashMap, VecDeque};

use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::debug;

use crate::token::{Token, TokenType};

/// The name of the state every lexer starts in.
pub const ROOT_STATE: &str = "root";

/// A token source over borrowed text.
pub trait Lexer<'t>: Iterator<Item = Token<'t>> {}

/// How the text matched by a rule is turned into tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchAction {
	/// The whole match becomes one token.
	Single(TokenType),
	/// Each capture group becomes one token; empty groups are skipped.
	ByGroups(&'static [TokenType]),
}

/// How the state stack changes after a rule matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateAction {
	None,
	Pop,
	PopMulti(usize),
	Push(&'static str),
	PushMulti(&'static [&'static str]),
	/// Pushes the current state again, the given number of times.
	PushSelf(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleDef {
	Regex(&'static str, MatchAction, StateAction),
	/// Matches any of the literal words.
	Words(&'static [&'static str], MatchAction, StateAction),
	/// Always applies without consuming input; only useful for changing state.
	Default(StateAction),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
	pub ignore_case: bool,
	pub dot_all: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct MachineDef {
	pub name: &'static str,
	pub flags: Flags,
	pub states: &'static [(&'static str, &'static [RuleDef])],
}

/// Defines a machine definition error.
#[derive(Error, Debug)]
pub enum MachineError {
	#[error("machine '{machine}' has no 'root' state")]
	MissingRoot { machine: &'static str },

	#[error("machine '{machine}' defines state '{state}' more than once")]
	DuplicateState { machine: &'static str, state: &'static str },

	#[error("invalid pattern in state '{state}' of machine '{machine}'")]
	Pattern {
		machine: &'static str,
		state: &'static str,
		#[source]
		source: regex::Error,
	},

	#[error("state '{state}' of machine '{machine}' moves to unknown state '{target}'")]
	UnknownState { machine: &'static str, state: &'static str, target: &'static str },

	#[error("a rule in state '{state}' of machine '{machine}' assigns {types} token types to {groups} groups")]
	GroupArity { machine: &'static str, state: &'static str, types: usize, groups: usize },

	#[error("a default rule in state '{state}' of machine '{machine}' never changes state")]
	StuckDefault { machine: &'static str, state: &'static str },
}

#[derive(Debug)]
enum Transition {
	None,
	Pop(usize),
	Push(Vec<usize>),
	PushSelf(usize),
}

impl Transition {
	/// Whether applying the transition to a stack `depth` states deep changes it.
	fn changes(&self, depth: usize) -> bool {
		match self {
			Transition::None => false,
			Transition::Pop(n) => *n > 0 && depth > 1,
			Transition::Push(targets) => !targets.is_empty(),
			Transition::PushSelf(n) => *n > 0,
		}
	}
}

#[derive(Debug)]
enum Matcher {
	Pattern(Regex, MatchAction),
	Always,
}

#[derive(Debug)]
struct Rule {
	matcher: Matcher,
	transition: Transition,
}

#[derive(Debug)]
struct State {
	name: &'static str,
	rules: Vec<Rule>,
}

/// A compiled, validated [`MachineDef`].
#[derive(Debug)]
pub struct Machine {
	name: &'static str,
	states: Vec<State>,
	root: usize,
}

impl Machine {
	/// Compiles every pattern of `def` and resolves its state names.
	pub fn compile(def: &MachineDef) -> Result<Machine, MachineError> {
		let machine = def.name;
		let mut index = HashMap::new();
		for (i, &(state, _)) in def.states.iter().enumerate() {
			if index.insert(state, i).is_some() {
				return Err(MachineError::DuplicateState { machine, state });
			}
		}
		let root = *index.get(ROOT_STATE).ok_or(MachineError::MissingRoot { machine })?;

		let resolve = |state: &'static str, target: &'static str| {
			index.get(target).copied().ok_or(MachineError::UnknownState { machine, state, target })
		};

		let mut states = Vec::with_capacity(def.states.len());
		for &(state, rules) in def.states {
			let mut compiled = Vec::with_capacity(rules.len());
			for rule in rules {
				let (matcher, action) = match *rule {
					RuleDef::Regex(pattern, match_action, action) => {
						let rx = build_regex(pattern, def.flags)
							.map_err(|source| MachineError::Pattern { machine, state, source })?;
						if let MatchAction::ByGroups(types) = match_action {
							let groups = rx.captures_len() - 1;
							if groups != types.len() {
								return Err(MachineError::GroupArity { machine, state, types: types.len(), groups });
							}
						}
						(Matcher::Pattern(rx, match_action), action)
					}
					RuleDef::Words(words, match_action, action) => {
						let alternatives: Vec<_> = words.iter().map(|word| regex::escape(word)).collect();
						let rx = build_regex(&alternatives.join("|"), def.flags)
							.map_err(|source| MachineError::Pattern { machine, state, source })?;
						if let MatchAction::ByGroups(types) = match_action {
							return Err(MachineError::GroupArity { machine, state, types: types.len(), groups: 0 });
						}
						(Matcher::Pattern(rx, match_action), action)
					}
					RuleDef::Default(action) => (Matcher::Always, action),
				};

				let transition = match action {
					StateAction::None => Transition::None,
					StateAction::Pop => Transition::Pop(1),
					StateAction::PopMulti(n) => Transition::Pop(n),
					StateAction::Push(target) => Transition::Push(vec![resolve(state, target)?]),
					StateAction::PushMulti(targets) => {
						Transition::Push(targets.iter().map(|&target| resolve(state, target)).collect::<Result<Vec<_>, MachineError>>()?)
					}
					StateAction::PushSelf(n) => Transition::PushSelf(n),
				};
				// every state but root sits on top of at least the root state
				let depth = if state == ROOT_STATE { 1 } else { 2 };
				if matches!(matcher, Matcher::Always) && !transition.changes(depth) {
					return Err(MachineError::StuckDefault { machine, state });
				}
				compiled.push(Rule { matcher, transition });
			}
			states.push(State { name: state, rules: compiled });
		}

		debug!(machine, states = states.len(), "compiled lexer machine");
		Ok(Machine { name: machine, states, root })
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn state_names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.states.iter().map(|state| state.name)
	}

	/// Starts lexing `text` in the root state.
	pub fn lex<'m, 't>(&'m self, text: &'t str) -> RegexLexer<'m, 't> {
		RegexLexer::new(self, text)
	}
}

/// Anchors `pattern` at the current position and applies the machine flags.
fn build_regex(pattern: &str, flags: Flags) -> Result<Regex, regex::Error> {
	RegexBuilder::new(&format!(r"\A(?:{pattern})"))
		.case_insensitive(flags.ignore_case)
		.dot_matches_new_line(flags.dot_all)
		.build()
}

/// Iterates over the tokens of a text as recognized by a [`Machine`].
///
/// The token texts, concatenated, always reproduce the input. Input that no rule matches is emitted one character at a
/// time as [`TokenType::Error`]; an unmatched newline resets the state stack to the root state instead.
///
/// A rule that consumes nothing only applies if it changes the state stack, and only a bounded number of times in a row.
/// Past that bound the lexer treats the position as unmatched, so every machine yields a finite token sequence.
pub struct RegexLexer<'m, 't> {
	machine: &'m Machine,
	stack: Vec<usize>,
	queue: VecDeque<Token<'t>>,
	rest: &'t str,
	stalled: usize,
	stall_limit: usize,
}

impl<'m, 't> RegexLexer<'m, 't> {
	pub fn new(machine: &'m Machine, text: &'t str) -> Self {
		RegexLexer {
			machine,
			stack: vec![machine.root],
			queue: VecDeque::with_capacity(16),
			rest: text,
			stalled: 0,
			stall_limit: 0,
		}
	}

	/// The names of the states on the stack, bottom first.
	pub fn states(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.stack.iter().map(|&i| self.machine.states[i].name)
	}

	fn top(&self) -> usize {
		// the stack never drops below the root state
		self.stack[self.stack.len() - 1]
	}

	fn emit(&mut self, text: &'t str, ttype: TokenType) {
		if !text.is_empty() {
			self.queue.push_back(Token { text, ttype });
		}
	}

	fn advance(&mut self, len: usize) -> &'t str {
		let (matched, rest) = self.rest.split_at(len);
		self.rest = rest;
		if len > 0 {
			self.stalled = 0;
		}
		matched
	}

	/// Whether a rule matching `len` bytes and then applying `transition` moves the lexer forward.
	fn progresses(&self, len: usize, transition: &Transition) -> bool {
		len > 0 || (self.stalled < self.stall_limit && transition.changes(self.stack.len()))
	}

	fn transition(&mut self, transition: &Transition) {
		match transition {
			Transition::None => {}
			Transition::Pop(n) => {
				let keep = self.stack.len().saturating_sub(*n).max(1);
				self.stack.truncate(keep);
			}
			Transition::Push(targets) => self.stack.extend_from_slice(targets),
			Transition::PushSelf(n) => {
				let top = self.top();
				self.stack.extend(std::iter::repeat(top).take(*n));
			}
		}
	}

	/// Applies the first matching rule of the current state, or recovers from unmatched input.
	fn step(&mut self) {
		let machine = self.machine;
		let rest = self.rest;
		if self.stalled == 0 {
			// enough to walk down the current stack and through every state once, in both directions
			self.stall_limit = 2 * (self.stack.len() + machine.states.len());
		}

		for rule in &machine.states[self.top()].rules {
			let len = match &rule.matcher {
				Matcher::Always if self.progresses(0, &rule.transition) => 0,
				Matcher::Always => continue,
				Matcher::Pattern(rx, MatchAction::Single(ttype)) => match rx.find(rest) {
					Some(found) if self.progresses(found.end(), &rule.transition) => {
						let matched = self.advance(found.end());
						self.emit(matched, *ttype);
						found.end()
					}
					_ => continue,
				},
				Matcher::Pattern(rx, MatchAction::ByGroups(types)) => match rx.captures(rest) {
					Some(caps) => {
						let end = caps.get(0).map_or(0, |m| m.end());
						if !self.progresses(end, &rule.transition) {
							continue;
						}
						for (i, &ttype) in types.iter().enumerate() {
							if let Some(group) = caps.get(i + 1) {
								self.emit(group.as_str(), ttype);
							}
						}
						self.advance(end);
						end
					}
					None => continue,
				},
			};
			if len == 0 {
				self.stalled += 1;
			}
			self.transition(&rule.transition);
			return;
		}

		let len = rest.chars().next().map_or(0, char::len_utf8);
		let unmatched = self.advance(len);
		if unmatched == "\n" {
			self.stack.truncate(1);
			self.emit(unmatched, TokenType::Text);
		} else {
			self.emit(unmatched, TokenType::Error);
		}
	}
}

impl<'m, 't> Iterator for RegexLexer<'m, 't> {
	type Item = Token<'t>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(token) = self.queue.pop_front() {
				return Some(token);
			}
			if self.rest.is_empty() {
				return None;
			}
			self.step();
		}
	}
}

impl<'m, 't> Lexer<'t> for RegexLexer<'m, 't> {}
