//! Komprimierte Bild-Snapshots mit asynchroner (De-)Kompression.
//!
//! Ein Snapshot ist entweder entpackt (lesbar) oder komprimiert. Die
//! Kompression läuft auf einem eigenen Thread; währenddessen ist der
//! Status `Busy` und Leser blockieren über eine Condvar, bis `Idle`
//! erreicht ist oder das Timeout abläuft.

use super::{LabelVolume, VolumeGeometry};
use anyhow::{anyhow, bail};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

/// Geteilte Referenz auf einen Snapshot (Dokument-Historie und Cache teilen sich Einträge).
pub type SnapshotRef = Arc<ImageSnapshot>;

/// Bearbeitungsstatus eines Snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotStatus {
    /// Keine Kompression/Dekompression aktiv, lesbar
    Idle,
    /// Kompression oder Dekompression läuft
    Busy,
}

#[derive(Debug)]
enum Payload {
    /// Entpacktes Bild
    Raw(Arc<LabelVolume>),
    /// Zlib-komprimierte Label-Bytes
    Compressed(Vec<u8>),
    /// Platzhalter während einer Dekompression
    Detached,
}

#[derive(Debug)]
struct SnapshotState {
    status: SnapshotStatus,
    payload: Payload,
}

/// Komprimierbarer Snapshot eines Label-Volumens.
#[derive(Debug)]
pub struct ImageSnapshot {
    geometry: VolumeGeometry,
    level: u32,
    state: Mutex<SnapshotState>,
    ready: Condvar,
}

impl ImageSnapshot {
    /// Erfasst ein Volumen entpackt und `Idle` (sofort lesbar, noch nicht komprimiert).
    pub fn capture(volume: LabelVolume, level: u32) -> SnapshotRef {
        Arc::new(Self {
            geometry: *volume.geometry(),
            level: level.min(9),
            state: Mutex::new(SnapshotState {
                status: SnapshotStatus::Idle,
                payload: Payload::Raw(Arc::new(volume)),
            }),
            ready: Condvar::new(),
        })
    }

    /// Erfasst ein Volumen und startet sofort die asynchrone Kompression.
    pub fn stash(volume: LabelVolume, level: u32) -> SnapshotRef {
        let snapshot = Self::capture(volume, level);
        snapshot.release();
        snapshot
    }

    /// Geometrie des gespeicherten Volumens.
    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    /// Aktueller Status.
    pub fn status(&self) -> SnapshotStatus {
        self.lock().status
    }

    /// Gibt `true` zurück, wenn der Snapshot komprimiert vorliegt.
    pub fn is_compressed(&self) -> bool {
        matches!(self.lock().payload, Payload::Compressed(_))
    }

    /// Größe der komprimierten Daten (falls komprimiert).
    pub fn compressed_len(&self) -> Option<usize> {
        match &self.lock().payload {
            Payload::Compressed(bytes) => Some(bytes.len()),
            _ => None,
        }
    }

    /// Blockiert, bis der Snapshot `Idle` ist.
    pub fn wait_idle(&self, timeout: Duration) -> anyhow::Result<()> {
        let _guard = self.wait_for_idle(self.lock(), timeout)?;
        Ok(())
    }

    /// Wartet auf `Idle` und liefert das entpackte Bild.
    ///
    /// Ein komprimierter Snapshot wird dabei entpackt und bleibt entpackt,
    /// bis [`ImageSnapshot::release`] ihn wieder komprimiert.
    pub fn acquire_for_read(&self, timeout: Duration) -> anyhow::Result<Arc<LabelVolume>> {
        let mut guard = self.wait_for_idle(self.lock(), timeout)?;

        let bytes = match std::mem::replace(&mut guard.payload, Payload::Detached) {
            Payload::Raw(volume) => {
                guard.payload = Payload::Raw(Arc::clone(&volume));
                return Ok(volume);
            }
            Payload::Compressed(bytes) => bytes,
            Payload::Detached => bail!("Snapshot ohne Bilddaten"),
        };
        guard.status = SnapshotStatus::Busy;
        drop(guard);

        let decoded = inflate(&bytes).and_then(|raw| LabelVolume::from_bytes(self.geometry, &raw));

        let mut guard = self.lock();
        let result = match decoded {
            Ok(volume) => {
                let volume = Arc::new(volume);
                guard.payload = Payload::Raw(Arc::clone(&volume));
                Ok(volume)
            }
            Err(e) => {
                guard.payload = Payload::Compressed(bytes);
                Err(e)
            }
        };
        guard.status = SnapshotStatus::Idle;
        self.ready.notify_all();
        result
    }

    /// Startet die asynchrone Rekompression eines entpackten Snapshots.
    ///
    /// Bereits komprimierte oder gerade beschäftigte Snapshots bleiben unverändert.
    pub fn release(self: &Arc<Self>) {
        let volume = {
            let mut guard = self.lock();
            if guard.status == SnapshotStatus::Busy {
                log::debug!("Snapshot-Release übersprungen: Kompression läuft bereits");
                return;
            }
            let Payload::Raw(volume) = &guard.payload else {
                return;
            };
            let volume = Arc::clone(volume);
            guard.status = SnapshotStatus::Busy;
            volume
        };

        let worker = Arc::clone(self);
        let spawned = std::thread::Builder::new()
            .name("snapshot-stash".to_string())
            .spawn(move || worker.finish_compression(&volume));
        if let Err(e) = spawned {
            log::warn!("Kompressions-Thread nicht startbar, komprimiere synchron: {}", e);
            let volume = match &self.lock().payload {
                Payload::Raw(volume) => Arc::clone(volume),
                _ => return,
            };
            self.finish_compression(&volume);
        }
    }

    fn finish_compression(&self, volume: &LabelVolume) {
        let compressed = deflate(volume.as_bytes(), self.level);
        let mut guard = self.lock();
        match compressed {
            Ok(bytes) => guard.payload = Payload::Compressed(bytes),
            Err(e) => log::warn!("Snapshot-Kompression fehlgeschlagen, bleibt entpackt: {}", e),
        }
        guard.status = SnapshotStatus::Idle;
        self.ready.notify_all();
    }

    /// Setzt den Status direkt (hält einen Snapshot in Tests beschäftigt).
    #[cfg(test)]
    pub(crate) fn force_status(&self, status: SnapshotStatus) {
        self.lock().status = status;
        self.ready.notify_all();
    }

    fn lock(&self) -> MutexGuard<'_, SnapshotState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn wait_for_idle<'a>(
        &self,
        guard: MutexGuard<'a, SnapshotState>,
        timeout: Duration,
    ) -> anyhow::Result<MutexGuard<'a, SnapshotState>> {
        let (guard, result) = self
            .ready
            .wait_timeout_while(guard, timeout, |state| {
                state.status == SnapshotStatus::Busy
            })
            .unwrap_or_else(|e| e.into_inner());
        if result.timed_out() && guard.status == SnapshotStatus::Busy {
            return Err(anyhow!(
                "Snapshot nach {} ms noch in Bearbeitung",
                timeout.as_millis()
            ));
        }
        Ok(guard)
    }
}

fn deflate(bytes: &[u8], level: u32) -> anyhow::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

fn inflate(bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut raw = Vec::new();
    ZlibDecoder::new(bytes).read_to_end(&mut raw)?;
    Ok(raw)
}
