//! Punktlisten (Fiducials) für Zentrums- und Verfeinerungspunkte.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Geordnete Liste von Weltpunkten mit optionaler Kapazitätsgrenze.
///
/// Bei erreichter Grenze ersetzt `append` den letzten Punkt, statt die
/// Liste zu verlängern (globale Verfeinerung hält genau einen Punkt).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointList {
    points: Vec<Vec3>,
    capacity: Option<usize>,
}

impl PointList {
    /// Unbegrenzte Liste.
    pub fn new() -> Self {
        Self::default()
    }

    /// Liste mit fester Obergrenze (mindestens 1).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            points: Vec::with_capacity(limit.max(1)),
            capacity: Some(limit.max(1)),
        }
    }

    /// Anzahl der Punkte.
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Gibt `true` zurück, wenn keine Punkte vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Hängt einen Punkt an (oder ersetzt den letzten bei voller Liste).
    pub fn append(&mut self, point: Vec3) {
        match self.capacity {
            Some(limit) if self.points.len() >= limit => self.replace_last(point),
            _ => self.points.push(point),
        }
    }

    /// Ersetzt den letzten Punkt; bei leerer Liste wird angehängt.
    pub fn replace_last(&mut self, point: Vec3) {
        match self.points.last_mut() {
            Some(last) => *last = point,
            None => self.points.push(point),
        }
    }

    /// Entfernt alle Punkte.
    pub fn remove_all(&mut self) {
        self.points.clear();
    }

    /// Zuletzt gesetzter Punkt.
    pub fn last(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    /// Read-only Sicht auf alle Punkte.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}
