//! Transient state threaded through the document builder.

use crate::language::{Region, Table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct State {
    region: Region,
    transpose: i32,
    capo: Option<i32>,
    memorizing: bool,
    memorized: Table<Vec<Option<String>>>,
    line: usize,
}

impl State {
    pub(crate) fn new(transpose: i32) -> State {
        State {
            region: Region::Default,
            transpose,
            capo: None,
            memorizing: false,
            memorized: Table::new(),
            line: 1,
        }
    }

    pub(crate) fn current(&self) -> Region {
        self.region
    }

    pub(crate) fn enter(&mut self, region: Region) {
        self.region = region;
        if matches!(region, Region::Chorus | Region::Grid) {
            self.memorizing = true;
        }
    }

    /// Regions do not nest, so closing any region returns to the default
    /// one regardless of which region is actually active. Only the end of
    /// a chorus or grid stops memorizing.
    pub(crate) fn leave(&mut self, region: Region) -> Region {
        let previous = self.region;
        self.region = Region::Default;
        if matches!(region, Region::Chorus | Region::Grid) {
            self.memorizing = false;
        }
        previous
    }

    pub(crate) fn is_memorizing(&self) -> bool {
        self.memorizing
    }

    /// Remember the chord keys of the latest line for the current region,
    /// replacing whatever was there.
    pub(crate) fn memorize(&mut self, keys: Vec<Option<String>>) {
        if !self.memorizing || keys.is_empty() {
            return;
        }
        self.memorized
            .insert(self.region.as_str(), keys);
    }

    pub(crate) fn recall(&self, region: Region) -> Option<&Vec<Option<String>>> {
        self.memorized
            .get(region.as_str())
    }

    pub(crate) fn transpose(&self) -> i32 {
        self.transpose
    }

    pub(crate) fn set_transpose(&mut self, semitones: i32) {
        self.transpose = semitones;
    }

    pub(crate) fn capo(&self) -> Option<i32> {
        self.capo
    }

    pub(crate) fn set_capo(&mut self, capo: Option<i32>) {
        self.capo = capo;
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn advance(&mut self, line: usize) {
        self.line = line;
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn region_operations() {
        let mut state = State::new(0);
        assert_eq!(state.current(), Region::Default);

        state.enter(Region::Verse);
        assert_eq!(state.current(), Region::Verse);
        assert!(!state.is_memorizing());

        let left = state.leave(Region::Verse);
        assert_eq!(left, Region::Verse);
        assert_eq!(state.current(), Region::Default);

        // and leaving again stays in the default region
        let left = state.leave(Region::Bridge);
        assert_eq!(left, Region::Default);
    }

    #[test]
    fn memorizing_in_chorus() {
        let mut state = State::new(0);

        // outside a chorus nothing is remembered
        state.memorize(vec![Some("C".to_string())]);
        assert_eq!(state.recall(Region::Default), None);

        state.enter(Region::Chorus);
        assert!(state.is_memorizing());

        state.memorize(vec![Some("C".to_string()), Some("G".to_string())]);
        state.memorize(vec![Some("A-".to_string()), None]);
        // empty lines don't clobber the last one
        state.memorize(vec![]);

        // closing a verse doesn't stop memorizing
        state.leave(Region::Verse);
        assert!(state.is_memorizing());

        state.enter(Region::Chorus);
        state.leave(Region::Chorus);
        assert!(!state.is_memorizing());

        assert_eq!(
            state.recall(Region::Chorus),
            Some(&vec![Some("A-".to_string()), None])
        );
    }

    #[test]
    fn offsets() {
        let mut state = State::new(2);
        assert_eq!(state.transpose(), 2);
        state.set_transpose(-3);
        assert_eq!(state.transpose(), -3);

        assert_eq!(state.capo(), None);
        state.set_capo(Some(3));
        assert_eq!(state.capo(), Some(3));

        assert_eq!(state.line(), 1);
        state.advance(14);
        assert_eq!(state.line(), 14);
    }
}
