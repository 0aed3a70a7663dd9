//! Typed record store over a [`Storage`]
//!
//! Every record lives under its own [`RecordKey`]. Getters never fail:
//! an absent, unreadable or malformed record comes back as its default.
//! Updates are read-modify-write on a single key, stamping `updatedAt`
//! where the record carries one. An update refuses to run over a record
//! it cannot read and reports [`StoreError::Corrupt`] instead.

use crate::error::{StoreError, StoreResult};
use crate::export::ExportDocument;
use crate::keys::RecordKey;
use crate::storage::Storage;
use chrono::Utc;
use planner_model::{
    FocusArea, FocusAreaId, Idea, IdeaCategory, IdeaId, Onboarding, PlanLimits, PlanWarning,
    QuarterlyItem, QuarterlyRecord, Settings, StepNumber, StepProgress, Substep, Timing, User,
    UserPatch, VisionRecord, WhimsyItem, WhimsyStatus,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Typed access to the planner's persisted records
#[derive(Debug)]
pub struct RecordStore<S> {
    storage: S,
    limits: PlanLimits,
}

impl<S: Storage> RecordStore<S> {
    /// Create a store with default limits
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            limits: PlanLimits::default(),
        }
    }

    /// With custom limits
    #[must_use]
    pub fn with_limits(mut self, limits: PlanLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Backing storage
    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Limits in force
    #[inline]
    pub fn limits(&self) -> PlanLimits {
        self.limits
    }

    // ------------------------------------------------------------------
    // Raw access
    // ------------------------------------------------------------------

    fn read_value(&self, key: RecordKey) -> Option<Value> {
        let text = match self.storage.get(key.as_str()) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(%key, error = %e, "storage read failed, using default");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%key, error = %e, "stored record is not valid JSON, using default");
                None
            }
        }
    }

    fn read<T: DeserializeOwned>(&self, key: RecordKey) -> Option<T> {
        let value = self.read_value(key)?;
        match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(%key, error = %e, "stored record has unexpected shape, using default");
                None
            }
        }
    }

    /// Stored value for a read-modify-write
    ///
    /// Unlike the getters, a record that is present but unreadable is an
    /// error, so a mutation never replaces it with a default.
    fn read_value_for_update(&self, key: RecordKey) -> StoreResult<Option<Value>> {
        let Some(text) = self.storage.get(key.as_str())? else {
            return Ok(None);
        };
        serde_json::from_str(&text).map(Some).map_err(|e| {
            tracing::error!(%key, error = %e, "refusing to overwrite unreadable record");
            StoreError::corrupt(key.as_str(), e)
        })
    }

    fn read_for_update<T: DeserializeOwned + Default>(&self, key: RecordKey) -> StoreResult<T> {
        let Some(value) = self.read_value_for_update(key)? else {
            return Ok(T::default());
        };
        serde_json::from_value(value).map_err(|e| {
            tracing::error!(%key, error = %e, "refusing to overwrite unreadable record");
            StoreError::corrupt(key.as_str(), e)
        })
    }

    fn write<T: Serialize + ?Sized>(&self, key: RecordKey, record: &T) -> StoreResult<()> {
        let text =
            serde_json::to_string(record).map_err(|e| StoreError::serialization(key.as_str(), e))?;
        self.storage.set(key.as_str(), &text).map_err(|e| {
            tracing::error!(%key, error = %e, "failed to write record");
            StoreError::from(e)
        })
    }

    // ------------------------------------------------------------------
    // User
    // ------------------------------------------------------------------

    /// Stored user, or an unnamed one
    pub fn user(&self) -> User {
        self.read(RecordKey::User).unwrap_or_default()
    }

    /// Shallow-merge `patch` over the stored user and stamp `updatedAt`
    ///
    /// Fields absent from the patch, including ones this build does not
    /// model, keep their stored value.
    pub fn set_user(&self, patch: &UserPatch) -> StoreResult<User> {
        let key = RecordKey::User;
        let mut merged = match self.read_value_for_update(key)? {
            Some(Value::Object(map)) => map,
            Some(_) => return Err(StoreError::corrupt(key.as_str(), "expected an object")),
            None => serde_json::to_value(User::default())
                .ok()
                .and_then(|v| v.as_object().cloned())
                .unwrap_or_default(),
        };
        let patch =
            serde_json::to_value(patch).map_err(|e| StoreError::serialization(key.as_str(), e))?;
        if let Value::Object(fields) = patch {
            merged.extend(fields);
        }
        merged.insert(
            "updatedAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        let user: User = serde_json::from_value(Value::Object(merged))
            .map_err(|e| StoreError::serialization(key.as_str(), e))?;
        self.write(key, &user)?;
        Ok(user)
    }

    // ------------------------------------------------------------------
    // Onboarding
    // ------------------------------------------------------------------

    /// Stored onboarding state
    pub fn onboarding(&self) -> Onboarding {
        self.read(RecordKey::Onboarding).unwrap_or_default()
    }

    /// Update onboarding state
    pub fn update_onboarding(&self, f: impl FnOnce(&mut Onboarding)) -> StoreResult<Onboarding> {
        let mut onboarding: Onboarding = self.read_for_update(RecordKey::Onboarding)?;
        f(&mut onboarding);
        self.write(RecordKey::Onboarding, &onboarding)?;
        Ok(onboarding)
    }

    /// Whether onboarding finished
    pub fn is_onboarding_complete(&self) -> bool {
        self.onboarding().completed
    }

    // ------------------------------------------------------------------
    // Step progress
    // ------------------------------------------------------------------

    /// Stored step progress
    pub fn step_progress(&self) -> StepProgress {
        self.read(RecordKey::Steps).unwrap_or_default()
    }

    /// Update step progress and stamp it
    pub fn update_step_progress(
        &self,
        f: impl FnOnce(&mut StepProgress),
    ) -> StoreResult<StepProgress> {
        let mut progress: StepProgress = self.read_for_update(RecordKey::Steps)?;
        f(&mut progress);
        progress.updated_at = Some(Utc::now());
        self.write(RecordKey::Steps, &progress)?;
        Ok(progress)
    }

    /// Persist the current position inside a step
    pub fn set_step_position(&self, step: StepNumber, substep: Substep) -> StoreResult<()> {
        self.update_step_progress(|p| {
            p.current_step = step;
            p.current_substep = substep;
            p.at_interstitial = false;
        })
        .map(drop)
    }

    /// Persist that the user is on the screen between step 3 and step 4
    pub fn set_at_interstitial(&self) -> StoreResult<()> {
        self.update_step_progress(|p| p.at_interstitial = true).map(drop)
    }

    /// Record a finished step
    pub fn mark_step_complete(&self, step: StepNumber) -> StoreResult<()> {
        self.update_step_progress(|p| {
            p.mark_complete(step);
        })
        .map(drop)
    }

    /// Whether the user may open `step`
    pub fn is_step_accessible(&self, step: StepNumber) -> bool {
        self.step_progress().is_step_accessible(step)
    }

    // ------------------------------------------------------------------
    // Vision
    // ------------------------------------------------------------------

    /// Stored vision record
    pub fn vision(&self) -> VisionRecord {
        self.read(RecordKey::Vision).unwrap_or_default()
    }

    /// Update the vision record and stamp it
    pub fn update_vision<R>(&self, f: impl FnOnce(&mut VisionRecord) -> R) -> StoreResult<R> {
        let mut vision: VisionRecord = self.read_for_update(RecordKey::Vision)?;
        let out = f(&mut vision);
        vision.updated_at = Some(Utc::now());
        self.write(RecordKey::Vision, &vision)?;
        Ok(out)
    }

    /// Append an idea to a vision category; blank text is ignored
    pub fn add_idea(&self, category: IdeaCategory, text: &str) -> StoreResult<Option<Idea>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let idea = Idea::new(text);
        let stored = idea.clone();
        self.update_vision(move |v| v.ideas_mut(category).push(stored))?;
        tracing::debug!(category = category.as_str(), id = %idea.id, "idea added");
        Ok(Some(idea))
    }

    /// Delete an idea everywhere it can live; returns how many copies went
    ///
    /// Searches every vision category, every focus area's strategies and
    /// the legacy quarterly lists. Only records that held the id are
    /// rewritten.
    pub fn delete_idea(&self, id: &IdeaId) -> StoreResult<usize> {
        let mut removed = 0;

        let mut vision: VisionRecord = self.read_for_update(RecordKey::Vision)?;
        let n = vision.remove_idea(id);
        if n > 0 {
            vision.updated_at = Some(Utc::now());
            self.write(RecordKey::Vision, &vision)?;
            removed += n;
        }

        let mut areas: Vec<FocusArea> = self.read_for_update(RecordKey::FocusAreas)?;
        let mut touched = false;
        for area in &mut areas {
            let before = area.actions.len();
            area.actions.retain(|a| &a.id != id);
            if area.actions.len() != before {
                removed += before - area.actions.len();
                area.touch();
                touched = true;
            }
        }
        if touched {
            self.set_focus_areas(&areas)?;
        }

        let mut quarterly: QuarterlyRecord = self.read_for_update(RecordKey::Quarterly)?;
        let n = quarterly.remove_item(id);
        if n > 0 {
            quarterly.updated_at = Some(Utc::now());
            self.write(RecordKey::Quarterly, &quarterly)?;
            removed += n;
        }

        tracing::debug!(%id, removed, "idea deleted");
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Focus areas
    // ------------------------------------------------------------------

    /// Stored focus areas in creation order
    pub fn focus_areas(&self) -> Vec<FocusArea> {
        self.read(RecordKey::FocusAreas).unwrap_or_default()
    }

    /// Replace the focus-area list
    pub fn set_focus_areas(&self, areas: &[FocusArea]) -> StoreResult<()> {
        self.write(RecordKey::FocusAreas, areas)
    }

    /// Look up one focus area
    pub fn focus_area(&self, id: &FocusAreaId) -> Option<FocusArea> {
        self.focus_areas().into_iter().find(|a| &a.id == id)
    }

    /// Create a focus area
    ///
    /// Fails with [`PlanWarning::FocusAreaLimit`] once the limit is
    /// reached; nothing is written in that case.
    pub fn add_focus_area(
        &self,
        title: &str,
        emoji: &str,
        description: &str,
    ) -> StoreResult<FocusArea> {
        let mut areas: Vec<FocusArea> = self.read_for_update(RecordKey::FocusAreas)?;
        let limit = self.limits.max_focus_areas;
        if areas.len() >= limit {
            return Err(PlanWarning::FocusAreaLimit { limit }.into());
        }
        let area = FocusArea::new(title, emoji, description);
        areas.push(area.clone());
        self.set_focus_areas(&areas)?;
        tracing::debug!(id = %area.id, "focus area added");
        Ok(area)
    }

    /// Edit a focus area in place and stamp it
    pub fn update_focus_area<R>(
        &self,
        id: &FocusAreaId,
        f: impl FnOnce(&mut FocusArea) -> R,
    ) -> StoreResult<R> {
        let mut areas: Vec<FocusArea> = self.read_for_update(RecordKey::FocusAreas)?;
        let area = areas
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| StoreError::FocusAreaNotFound(id.clone()))?;
        let out = f(area);
        area.touch();
        self.set_focus_areas(&areas)?;
        Ok(out)
    }

    /// Delete a focus area; returns whether it existed
    pub fn delete_focus_area(&self, id: &FocusAreaId) -> StoreResult<bool> {
        let mut areas: Vec<FocusArea> = self.read_for_update(RecordKey::FocusAreas)?;
        let before = areas.len();
        areas.retain(|a| &a.id != id);
        if areas.len() == before {
            return Ok(false);
        }
        self.set_focus_areas(&areas)?;
        Ok(true)
    }

    /// Drop every focus area with a blank title; returns how many went
    pub fn prune_blank_focus_areas(&self) -> StoreResult<usize> {
        let mut areas: Vec<FocusArea> = self.read_for_update(RecordKey::FocusAreas)?;
        let before = areas.len();
        areas.retain(|a| !a.is_blank());
        let pruned = before - areas.len();
        if pruned > 0 {
            self.set_focus_areas(&areas)?;
            tracing::debug!(pruned, "blank focus areas removed");
        }
        Ok(pruned)
    }

    // ------------------------------------------------------------------
    // Legacy quarterly record
    // ------------------------------------------------------------------

    /// Stored quarterly record
    pub fn quarterly(&self) -> QuarterlyRecord {
        self.read(RecordKey::Quarterly).unwrap_or_default()
    }

    /// Update the quarterly record and stamp it
    pub fn update_quarterly<R>(&self, f: impl FnOnce(&mut QuarterlyRecord) -> R) -> StoreResult<R> {
        let mut quarterly: QuarterlyRecord = self.read_for_update(RecordKey::Quarterly)?;
        let out = f(&mut quarterly);
        quarterly.updated_at = Some(Utc::now());
        self.write(RecordKey::Quarterly, &quarterly)?;
        Ok(out)
    }

    /// Append an item to a quarter
    ///
    /// Returns `Ok(None)` for [`Timing::Might`], which has no list here.
    pub fn add_quarterly_item(
        &self,
        quarter: Timing,
        text: &str,
        focus_area_id: Option<FocusAreaId>,
    ) -> StoreResult<Option<QuarterlyItem>> {
        if !quarter.is_quarter() {
            return Ok(None);
        }
        let item = QuarterlyItem::new(text, focus_area_id);
        self.update_quarterly(|q| {
            let items = q.quarter_mut(quarter)?;
            items.push(item.clone());
            Some(item)
        })
    }

    /// Edit one quarterly item in place
    pub fn update_quarterly_item(
        &self,
        quarter: Timing,
        id: &IdeaId,
        f: impl FnOnce(&mut QuarterlyItem),
    ) -> StoreResult<QuarterlyItem> {
        let mut quarterly: QuarterlyRecord = self.read_for_update(RecordKey::Quarterly)?;
        let item = quarterly
            .quarter_mut(quarter)
            .and_then(|items| items.iter_mut().find(|i| &i.id == id))
            .ok_or_else(|| StoreError::QuarterlyItemNotFound(id.clone()))?;
        f(item);
        let updated = item.clone();
        quarterly.updated_at = Some(Utc::now());
        self.write(RecordKey::Quarterly, &quarterly)?;
        Ok(updated)
    }

    // ------------------------------------------------------------------
    // Whimsy
    // ------------------------------------------------------------------

    /// Stored whimsy list
    pub fn whimsy(&self) -> Vec<WhimsyItem> {
        self.read(RecordKey::Whimsy).unwrap_or_default()
    }

    /// Append a whimsy item; blank text is ignored
    pub fn add_whimsy(&self, text: &str) -> StoreResult<Option<WhimsyItem>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let mut items: Vec<WhimsyItem> = self.read_for_update(RecordKey::Whimsy)?;
        let item = WhimsyItem::new(text);
        items.push(item.clone());
        self.write(RecordKey::Whimsy, &items)?;
        Ok(Some(item))
    }

    /// Delete a whimsy item; returns whether it existed
    pub fn delete_whimsy(&self, id: &IdeaId) -> StoreResult<bool> {
        let mut items: Vec<WhimsyItem> = self.read_for_update(RecordKey::Whimsy)?;
        let before = items.len();
        items.retain(|i| &i.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.write(RecordKey::Whimsy, &items)?;
        Ok(true)
    }

    /// Change a whimsy item's status
    pub fn set_whimsy_status(&self, id: &IdeaId, status: WhimsyStatus) -> StoreResult<()> {
        let mut items: Vec<WhimsyItem> = self.read_for_update(RecordKey::Whimsy)?;
        let item = items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| StoreError::WhimsyNotFound(id.clone()))?;
        item.status = status;
        self.write(RecordKey::Whimsy, &items)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Stored reminder settings
    pub fn settings(&self) -> Settings {
        self.read(RecordKey::Settings).unwrap_or_default()
    }

    /// Update settings and stamp them
    pub fn update_settings(&self, f: impl FnOnce(&mut Settings)) -> StoreResult<Settings> {
        let mut settings: Settings = self.read_for_update(RecordKey::Settings)?;
        f(&mut settings);
        settings.updated_at = Some(Utc::now());
        self.write(RecordKey::Settings, &settings)?;
        Ok(settings)
    }

    // ------------------------------------------------------------------
    // Export / import / clear
    // ------------------------------------------------------------------

    /// Snapshot every exported record with a timestamp
    pub fn export_all(&self) -> ExportDocument {
        let doc = ExportDocument {
            user: self.user(),
            vision: self.vision(),
            focus_areas: self.focus_areas(),
            quarterly: self.quarterly(),
            whimsy: self.whimsy(),
            settings: self.settings(),
            exported_at: Utc::now(),
        };
        tracing::info!(focus_areas = doc.focus_areas.len(), "data exported");
        doc
    }

    /// Replace all data with an exported document
    ///
    /// Clears every key first, then writes each record and marks
    /// onboarding complete so the imported plan opens on the dashboard
    /// path rather than the welcome screens.
    pub fn import_all(&self, doc: &ExportDocument) -> StoreResult<()> {
        self.clear_all()?;
        self.write(RecordKey::User, &doc.user)?;
        self.write(RecordKey::Vision, &doc.vision)?;
        self.set_focus_areas(&doc.focus_areas)?;
        self.write(RecordKey::Quarterly, &doc.quarterly)?;
        self.write(RecordKey::Whimsy, &doc.whimsy)?;
        self.write(RecordKey::Settings, &doc.settings)?;
        self.update_onboarding(|o| o.completed = true)?;
        tracing::info!(exported_at = %doc.exported_at, "data imported");
        Ok(())
    }

    /// Remove every key independently
    ///
    /// Keys that fail to clear are collected into
    /// [`StoreError::PartialClear`]; the others are gone regardless.
    pub fn clear_all(&self) -> StoreResult<()> {
        let mut failed = Vec::new();
        for key in RecordKey::ALL {
            if let Err(e) = self.storage.remove(key.as_str()) {
                tracing::error!(%key, error = %e, "failed to clear record");
                failed.push(key.as_str().to_string());
            }
        }
        if failed.is_empty() {
            tracing::info!("all data cleared");
            Ok(())
        } else {
            Err(StoreError::PartialClear { keys: failed })
        }
    }

    // ------------------------------------------------------------------
    // Progress
    // ------------------------------------------------------------------

    /// Rounded percentage of finished wizard steps
    pub fn overall_progress(&self) -> u32 {
        self.step_progress().overall_percent()
    }

    /// Rounded mean of focus-area status weights; 0 with no areas
    pub fn focus_area_progress(&self) -> u32 {
        let areas = self.focus_areas();
        if areas.is_empty() {
            return 0;
        }
        let total: u32 = areas.iter().map(|a| a.status.weight()).sum();
        let count = u32::try_from(areas.len()).unwrap_or(u32::MAX);
        (total + count / 2) / count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use planner_model::FocusAreaStatus;
    use pretty_assertions::assert_eq;

    fn store() -> RecordStore<MemoryStorage> {
        RecordStore::new(MemoryStorage::new())
    }

    #[test]
    fn defaults_when_absent() {
        let store = store();
        assert_eq!(store.user(), User::default());
        assert_eq!(store.onboarding(), Onboarding::default());
        assert_eq!(store.step_progress().current_step, 1);
        assert_eq!(store.vision().years_from_now, 5);
        assert!(store.focus_areas().is_empty());
        assert!(store.whimsy().is_empty());
        assert_eq!(store.settings().reminder_time, "12:00");
    }

    #[test]
    fn malformed_record_reads_as_default() {
        let store = store();
        store
            .storage()
            .set(RecordKey::Vision.as_str(), "{not json")
            .unwrap();
        assert_eq!(store.vision().years_from_now, 5);
        store
            .storage()
            .set(RecordKey::FocusAreas.as_str(), "{\"not\":\"a list\"}")
            .unwrap();
        assert!(store.focus_areas().is_empty());
    }

    #[test]
    fn updates_never_overwrite_an_unreadable_record() {
        let store = store();
        let stored = r#"[{"id":"fa1","title":"Health"},{"id":"fa2","title":"Career","linkedIdeas":"oops"}]"#;
        store
            .storage()
            .set(RecordKey::FocusAreas.as_str(), stored)
            .unwrap();

        let err = store.add_focus_area("Travel", "", "").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(store.prune_blank_focus_areas().is_err());
        assert!(store
            .update_focus_area(&FocusAreaId::from("fa1"), |a| a.title.clear())
            .is_err());
        assert_eq!(
            store.storage().get(RecordKey::FocusAreas.as_str()).unwrap().as_deref(),
            Some(stored)
        );

        store
            .storage()
            .set(RecordKey::Whimsy.as_str(), "{not json")
            .unwrap();
        assert!(store.add_whimsy("See the aurora").is_err());
        assert_eq!(
            store.storage().get(RecordKey::Whimsy.as_str()).unwrap().as_deref(),
            Some("{not json")
        );

        store
            .storage()
            .set(RecordKey::User.as_str(), "[1, 2]")
            .unwrap();
        assert!(matches!(
            store.set_user(&UserPatch::name("Alex")),
            Err(StoreError::Corrupt { .. })
        ));
        assert_eq!(
            store.storage().get(RecordKey::User.as_str()).unwrap().as_deref(),
            Some("[1, 2]")
        );
    }

    #[test]
    fn unreadable_vision_blocks_idea_edits() {
        let store = store();
        store
            .storage()
            .set(RecordKey::Vision.as_str(), r#"{"futureGoals": 7}"#)
            .unwrap();
        assert_eq!(store.vision().years_from_now, 5);
        assert!(store.add_idea(IdeaCategory::FutureGoals, "Run").is_err());
        assert!(store.delete_idea(&IdeaId::from("x")).is_err());
        assert_eq!(
            store.storage().get(RecordKey::Vision.as_str()).unwrap().as_deref(),
            Some(r#"{"futureGoals": 7}"#)
        );
    }

    #[test]
    fn set_user_merges_over_stored_fields() {
        let store = store();
        store
            .storage()
            .set(
                RecordKey::User.as_str(),
                r#"{"name":"Sam","planningYear":2026,"createdAt":"2026-01-01T00:00:00Z","theme":"dark"}"#,
            )
            .unwrap();

        let user = store.set_user(&UserPatch::name("Alex")).unwrap();
        assert_eq!(user.name, "Alex");
        assert_eq!(user.planning_year, Some(2026));
        assert!(user.created_at.is_some());
        assert!(user.updated_at.is_some());
        assert_eq!(user.extra.get("theme"), Some(&Value::from("dark")));
        assert_eq!(store.user(), user);
    }

    #[test]
    fn step_completion_is_deduplicated() {
        let store = store();
        store.mark_step_complete(2).unwrap();
        store.mark_step_complete(1).unwrap();
        store.mark_step_complete(2).unwrap();
        let progress = store.step_progress();
        assert_eq!(progress.completed_steps.into_iter().collect::<Vec<_>>(), vec![1, 2]);
        assert!(store.is_step_accessible(3));
        assert!(!store.is_step_accessible(4));
        assert_eq!(store.overall_progress(), 29);
    }

    #[test]
    fn idea_add_ignores_blank_and_delete_reaches_focus_areas() {
        let store = store();
        assert!(store.add_idea(IdeaCategory::FutureGoals, "   ").unwrap().is_none());
        let idea = store
            .add_idea(IdeaCategory::FutureGoals, " Run a marathon ")
            .unwrap()
            .unwrap();
        assert_eq!(idea.text, "Run a marathon");

        let area = store.add_focus_area("Health", "💪", "").unwrap();
        let action_id = store
            .update_focus_area(&area.id, |a| a.add_action("Join gym").map(|i| i.id.clone()))
            .unwrap()
            .unwrap();

        assert_eq!(store.delete_idea(&idea.id).unwrap(), 1);
        assert!(store.vision().future_goals.is_empty());
        assert_eq!(store.delete_idea(&action_id).unwrap(), 1);
        assert!(store.focus_area(&area.id).unwrap().actions.is_empty());
    }

    #[test]
    fn focus_area_limit_rejects_and_leaves_list() {
        let store = store().with_limits(PlanLimits::new().with_max_focus_areas(2));
        store.add_focus_area("One", "", "").unwrap();
        store.add_focus_area("Two", "", "").unwrap();
        let err = store.add_focus_area("Three", "", "").unwrap_err();
        assert_eq!(err.warning(), Some(PlanWarning::FocusAreaLimit { limit: 2 }));
        assert_eq!(store.focus_areas().len(), 2);
    }

    #[test]
    fn update_missing_focus_area_is_not_found() {
        let store = store();
        let err = store
            .update_focus_area(&FocusAreaId::from("nope"), |_| ())
            .unwrap_err();
        assert!(matches!(err, StoreError::FocusAreaNotFound(_)));
    }

    #[test]
    fn prune_removes_only_blank_titles() {
        let store = store();
        store.add_focus_area("Health", "", "").unwrap();
        store.add_focus_area("  ", "", "").unwrap();
        store.add_focus_area("", "", "").unwrap();
        assert_eq!(store.prune_blank_focus_areas().unwrap(), 2);
        let titles: Vec<_> = store.focus_areas().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Health".to_string()]);
        assert_eq!(store.prune_blank_focus_areas().unwrap(), 0);
    }

    #[test]
    fn whimsy_add_then_delete_restores_list() {
        let store = store();
        store.add_whimsy("See the aurora").unwrap();
        let before = store.whimsy();

        let added = store.add_whimsy("Learn to juggle").unwrap().unwrap();
        assert_eq!(store.whimsy().len(), 2);
        assert!(store.delete_whimsy(&added.id).unwrap());
        assert_eq!(store.whimsy(), before);
        assert!(!store.delete_whimsy(&added.id).unwrap());
    }

    #[test]
    fn whimsy_status_change() {
        let store = store();
        let item = store.add_whimsy("Skydive").unwrap().unwrap();
        store.set_whimsy_status(&item.id, WhimsyStatus::DidIt).unwrap();
        assert_eq!(store.whimsy()[0].status, WhimsyStatus::DidIt);
        let err = store
            .set_whimsy_status(&IdeaId::from("missing"), WhimsyStatus::DidIt)
            .unwrap_err();
        assert!(matches!(err, StoreError::WhimsyNotFound(_)));
    }

    #[test]
    fn quarterly_items() {
        let store = store();
        assert!(store
            .add_quarterly_item(Timing::Might, "x", None)
            .unwrap()
            .is_none());
        let item = store
            .add_quarterly_item(Timing::Q2, "Book race", None)
            .unwrap()
            .unwrap();
        let updated = store
            .update_quarterly_item(Timing::Q2, &item.id, |i| {
                i.status = planner_model::ActionStatus::Complete;
            })
            .unwrap();
        assert_eq!(updated.status, planner_model::ActionStatus::Complete);
        assert_eq!(store.quarterly().q2.len(), 1);
        assert!(store
            .update_quarterly_item(Timing::Q1, &item.id, |_| ())
            .is_err());
    }

    #[test]
    fn focus_area_progress_weights() {
        let store = store();
        assert_eq!(store.focus_area_progress(), 0);
        let a = store.add_focus_area("A", "", "").unwrap();
        let b = store.add_focus_area("B", "", "").unwrap();
        store.add_focus_area("C", "", "").unwrap();
        store
            .update_focus_area(&a.id, |a| a.status = FocusAreaStatus::Complete)
            .unwrap();
        store
            .update_focus_area(&b.id, |a| a.status = FocusAreaStatus::InProgress)
            .unwrap();
        assert_eq!(store.focus_area_progress(), 50);
    }

    #[test]
    fn export_import_round_trip() {
        let source = store();
        source.set_user(&UserPatch::name("Alex").with_planning_year(2027)).unwrap();
        source.add_idea(IdeaCategory::HighMarks, "Kind").unwrap();
        source.add_focus_area("Health", "💪", "Move more").unwrap();
        source.add_whimsy("Ride a camel").unwrap();
        let doc = source.export_all();

        let target = store();
        target.add_whimsy("to be replaced").unwrap();
        target.import_all(&doc).unwrap();

        assert_eq!(target.user(), doc.user);
        assert_eq!(target.vision(), doc.vision);
        assert_eq!(target.focus_areas(), doc.focus_areas);
        assert_eq!(target.whimsy(), doc.whimsy);
        assert!(target.is_onboarding_complete());
    }

    #[test]
    fn clear_all_removes_everything() {
        let store = store();
        store.set_user(&UserPatch::name("Alex")).unwrap();
        store.add_whimsy("x").unwrap();
        store.clear_all().unwrap();
        assert!(store.storage().is_empty());
    }
}
