//! Typed command bus for plan edits
//!
//! Screens describe an edit as a [`Command`] value and hand it to a
//! [`CommandRegistry`], which routes it to the [`CommandHandler`]
//! registered for its [`CommandKind`].

use crate::error::CommandError;
use planner_model::{
    ActionStatus, FocusAreaId, FocusAreaStatus, IdeaCategory, IdeaId, PlanWarning, Timing,
    WhimsyStatus,
};
use planner_store::{RecordStore, Storage, StoreError};
use std::collections::HashMap;
use std::sync::Arc;

/// Year horizons a vision may look ahead
pub const YEAR_HORIZONS: [u32; 3] = [3, 5, 10];

/// A single edit to the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add an idea to a vision category
    AddIdea {
        /// Category
        category: IdeaCategory,
        /// Idea text
        text: String,
    },
    /// Delete an idea wherever it lives
    DeleteIdea {
        /// Idea id
        id: IdeaId,
    },
    /// Replace the life vision statement
    SetVisionStatement {
        /// Statement text
        text: String,
    },
    /// Change how far ahead the vision looks
    SetYearsFromNow {
        /// 3, 5 or 10
        years: u32,
    },
    /// Create a focus area
    AddFocusArea {
        /// Title
        title: String,
        /// Emoji
        emoji: String,
        /// Description
        description: String,
    },
    /// Edit a focus area's heading fields
    EditFocusArea {
        /// Focus area
        area: FocusAreaId,
        /// New title
        title: Option<String>,
        /// New emoji
        emoji: Option<String>,
        /// New description
        description: Option<String>,
    },
    /// Delete a focus area
    DeleteFocusArea {
        /// Focus area
        area: FocusAreaId,
    },
    /// Link or unlink a future goal to a focus area
    LinkIdea {
        /// Focus area
        area: FocusAreaId,
        /// Goal text
        text: String,
        /// Link when true, unlink when false
        linked: bool,
    },
    /// Add a strategy to a focus area
    AddStrategy {
        /// Focus area
        area: FocusAreaId,
        /// Strategy text
        text: String,
    },
    /// Select or deselect a priority strategy
    TogglePriority {
        /// Focus area
        area: FocusAreaId,
        /// Strategy text
        strategy: String,
        /// Select when true
        checked: bool,
    },
    /// Mark a strategy as needing no breakdown
    SetNoSubSteps {
        /// Focus area
        area: FocusAreaId,
        /// Strategy text
        strategy: String,
        /// Flag value
        flag: bool,
    },
    /// Append a sub-step to a strategy
    AddSubStep {
        /// Focus area
        area: FocusAreaId,
        /// Strategy text
        strategy: String,
        /// Sub-step text
        text: String,
    },
    /// Remove a sub-step by position
    RemoveSubStep {
        /// Focus area
        area: FocusAreaId,
        /// Strategy text
        strategy: String,
        /// Position in the sub-step list
        index: usize,
    },
    /// Set or clear a strategy's final milestone
    SetFinalMilestone {
        /// Focus area
        area: FocusAreaId,
        /// Strategy text
        strategy: String,
        /// Milestone text; `None` clears it
        text: Option<String>,
    },
    /// Schedule or unschedule an actionable item
    SetTiming {
        /// Focus area
        area: FocusAreaId,
        /// Item text
        item: String,
        /// Bucket; `None` unschedules
        timing: Option<Timing>,
    },
    /// Record progress on an actionable item
    SetStatus {
        /// Focus area
        area: FocusAreaId,
        /// Item text
        item: String,
        /// New status
        status: ActionStatus,
    },
    /// Record progress on a whole focus area
    SetFocusAreaStatus {
        /// Focus area
        area: FocusAreaId,
        /// New status
        status: FocusAreaStatus,
    },
    /// Add a whimsy item
    AddWhimsy {
        /// Text
        text: String,
    },
    /// Delete a whimsy item
    DeleteWhimsy {
        /// Item id
        id: IdeaId,
    },
    /// Change a whimsy item's status
    SetWhimsyStatus {
        /// Item id
        id: IdeaId,
        /// New status
        status: WhimsyStatus,
    },
}

/// Discriminant of [`Command`], used as the registry key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CommandKind {
    AddIdea,
    DeleteIdea,
    SetVisionStatement,
    SetYearsFromNow,
    AddFocusArea,
    EditFocusArea,
    DeleteFocusArea,
    LinkIdea,
    AddStrategy,
    TogglePriority,
    SetNoSubSteps,
    AddSubStep,
    RemoveSubStep,
    SetFinalMilestone,
    SetTiming,
    SetStatus,
    SetFocusAreaStatus,
    AddWhimsy,
    DeleteWhimsy,
    SetWhimsyStatus,
}

impl CommandKind {
    /// Kinds served by [`VisionHandler`]
    pub const VISION: [CommandKind; 4] = [
        Self::AddIdea,
        Self::DeleteIdea,
        Self::SetVisionStatement,
        Self::SetYearsFromNow,
    ];

    /// Kinds served by [`FocusAreaHandler`]
    pub const FOCUS_AREA: [CommandKind; 13] = [
        Self::AddFocusArea,
        Self::EditFocusArea,
        Self::DeleteFocusArea,
        Self::LinkIdea,
        Self::AddStrategy,
        Self::TogglePriority,
        Self::SetNoSubSteps,
        Self::AddSubStep,
        Self::RemoveSubStep,
        Self::SetFinalMilestone,
        Self::SetTiming,
        Self::SetStatus,
        Self::SetFocusAreaStatus,
    ];

    /// Kinds served by [`WhimsyHandler`]
    pub const WHIMSY: [CommandKind; 3] = [Self::AddWhimsy, Self::DeleteWhimsy, Self::SetWhimsyStatus];
}

impl Command {
    /// This command's kind
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::AddIdea { .. } => CommandKind::AddIdea,
            Self::DeleteIdea { .. } => CommandKind::DeleteIdea,
            Self::SetVisionStatement { .. } => CommandKind::SetVisionStatement,
            Self::SetYearsFromNow { .. } => CommandKind::SetYearsFromNow,
            Self::AddFocusArea { .. } => CommandKind::AddFocusArea,
            Self::EditFocusArea { .. } => CommandKind::EditFocusArea,
            Self::DeleteFocusArea { .. } => CommandKind::DeleteFocusArea,
            Self::LinkIdea { .. } => CommandKind::LinkIdea,
            Self::AddStrategy { .. } => CommandKind::AddStrategy,
            Self::TogglePriority { .. } => CommandKind::TogglePriority,
            Self::SetNoSubSteps { .. } => CommandKind::SetNoSubSteps,
            Self::AddSubStep { .. } => CommandKind::AddSubStep,
            Self::RemoveSubStep { .. } => CommandKind::RemoveSubStep,
            Self::SetFinalMilestone { .. } => CommandKind::SetFinalMilestone,
            Self::SetTiming { .. } => CommandKind::SetTiming,
            Self::SetStatus { .. } => CommandKind::SetStatus,
            Self::SetFocusAreaStatus { .. } => CommandKind::SetFocusAreaStatus,
            Self::AddWhimsy { .. } => CommandKind::AddWhimsy,
            Self::DeleteWhimsy { .. } => CommandKind::DeleteWhimsy,
            Self::SetWhimsyStatus { .. } => CommandKind::SetWhimsyStatus,
        }
    }
}

/// What a handled command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The change was saved
    Applied,
    /// A record was created with this id
    Created(String),
    /// Nothing to do (blank text, unknown id, already in that state)
    Ignored,
    /// Refused by a plan limit; nothing was saved
    Warning(PlanWarning),
}

/// Carries out commands against a record store
pub trait CommandHandler<S: Storage>: Send + Sync {
    /// Apply `command`
    fn handle(
        &self,
        store: &RecordStore<S>,
        command: &Command,
    ) -> Result<CommandOutcome, CommandError>;
}

/// Registry routing each command kind to its handler
pub struct CommandRegistry<S: Storage> {
    handlers: HashMap<CommandKind, Arc<dyn CommandHandler<S>>>,
}

impl<S: Storage> std::fmt::Debug for CommandRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<S: Storage + 'static> Default for CommandRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Storage + 'static> CommandRegistry<S> {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create registry with the built-in handlers
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_all(&CommandKind::VISION, Arc::new(VisionHandler));
        registry.register_all(&CommandKind::FOCUS_AREA, Arc::new(FocusAreaHandler));
        registry.register_all(&CommandKind::WHIMSY, Arc::new(WhimsyHandler));
        registry
    }

    /// Register a handler for one kind, replacing any previous one
    pub fn register(&mut self, kind: CommandKind, handler: Arc<dyn CommandHandler<S>>) {
        self.handlers.insert(kind, handler);
    }

    /// Register one handler for several kinds
    pub fn register_all(&mut self, kinds: &[CommandKind], handler: Arc<dyn CommandHandler<S>>) {
        for kind in kinds {
            self.register(*kind, Arc::clone(&handler));
        }
    }

    /// Check if a kind has a handler
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: CommandKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Remove a kind's handler
    #[inline]
    pub fn remove(&mut self, kind: CommandKind) -> bool {
        self.handlers.remove(&kind).is_some()
    }

    /// Get number of registered kinds
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route a command to its handler
    pub fn dispatch(
        &self,
        store: &RecordStore<S>,
        command: &Command,
    ) -> Result<CommandOutcome, CommandError> {
        let kind = command.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or(CommandError::NoHandler(kind))?;
        let outcome = handler.handle(store, command)?;
        tracing::debug!(?kind, ?outcome, "command handled");
        Ok(outcome)
    }
}

fn created_or_ignored(id: Option<String>) -> CommandOutcome {
    id.map_or(CommandOutcome::Ignored, CommandOutcome::Created)
}

fn applied_if(changed: bool) -> CommandOutcome {
    if changed {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Ignored
    }
}

/// Vision ideas, statement and horizon
#[derive(Debug, Clone, Copy, Default)]
pub struct VisionHandler;

impl<S: Storage> CommandHandler<S> for VisionHandler {
    fn handle(
        &self,
        store: &RecordStore<S>,
        command: &Command,
    ) -> Result<CommandOutcome, CommandError> {
        match command {
            Command::AddIdea { category, text } => {
                let idea = store.add_idea(*category, text)?;
                Ok(created_or_ignored(idea.map(|i| i.id.to_string())))
            }
            Command::DeleteIdea { id } => Ok(applied_if(store.delete_idea(id)? > 0)),
            Command::SetVisionStatement { text } => {
                let text = text.trim().to_string();
                store.update_vision(|v| v.life_vision_statement = text)?;
                Ok(CommandOutcome::Applied)
            }
            Command::SetYearsFromNow { years } => {
                if !YEAR_HORIZONS.contains(years) {
                    return Err(CommandError::Invalid(format!(
                        "years from now must be one of {YEAR_HORIZONS:?}, got {years}"
                    )));
                }
                store.update_vision(|v| v.years_from_now = *years)?;
                Ok(CommandOutcome::Applied)
            }
            other => Err(CommandError::Unsupported(other.kind())),
        }
    }
}

/// Focus-area creation and every per-area edit
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusAreaHandler;

impl FocusAreaHandler {
    fn edit<S: Storage, R>(
        store: &RecordStore<S>,
        area: &FocusAreaId,
        f: impl FnOnce(&mut planner_model::FocusArea) -> R,
    ) -> Result<R, CommandError> {
        Ok(store.update_focus_area(area, f)?)
    }
}

impl<S: Storage> CommandHandler<S> for FocusAreaHandler {
    fn handle(
        &self,
        store: &RecordStore<S>,
        command: &Command,
    ) -> Result<CommandOutcome, CommandError> {
        let limits = store.limits();
        match command {
            Command::AddFocusArea {
                title,
                emoji,
                description,
            } => match store.add_focus_area(title, emoji, description) {
                Ok(area) => Ok(CommandOutcome::Created(area.id.to_string())),
                Err(StoreError::Limit(warning)) => Ok(CommandOutcome::Warning(warning)),
                Err(e) => Err(e.into()),
            },
            Command::EditFocusArea {
                area,
                title,
                emoji,
                description,
            } => {
                Self::edit(store, area, |a| {
                    if let Some(title) = title {
                        a.title.clone_from(title);
                    }
                    if let Some(emoji) = emoji {
                        a.emoji.clone_from(emoji);
                    }
                    if let Some(description) = description {
                        a.description.clone_from(description);
                    }
                })?;
                Ok(CommandOutcome::Applied)
            }
            Command::DeleteFocusArea { area } => Ok(applied_if(store.delete_focus_area(area)?)),
            Command::LinkIdea { area, text, linked } => {
                let changed = Self::edit(store, area, |a| {
                    if *linked {
                        a.link_idea(text)
                    } else {
                        a.unlink_idea(text)
                    }
                })?;
                Ok(applied_if(changed))
            }
            Command::AddStrategy { area, text } => {
                let id = Self::edit(store, area, |a| a.add_action(text).map(|i| i.id.to_string()))?;
                Ok(created_or_ignored(id))
            }
            Command::TogglePriority {
                area,
                strategy,
                checked,
            } => {
                let limit = limits.max_priority_actions;
                let refused = store
                    .focus_area(area)
                    .is_some_and(|a| *checked && !a.can_prioritize(strategy, limit));
                if refused {
                    return Ok(CommandOutcome::Warning(PlanWarning::PriorityLimit { limit }));
                }
                let result = Self::edit(store, area, |a| {
                    a.toggle_priority(strategy, *checked, limits.max_priority_actions)
                })?;
                Ok(match result {
                    Ok(()) => CommandOutcome::Applied,
                    Err(warning) => CommandOutcome::Warning(warning),
                })
            }
            Command::SetNoSubSteps {
                area,
                strategy,
                flag,
            } => {
                Self::edit(store, area, |a| a.set_no_sub_steps(strategy, *flag))?;
                Ok(CommandOutcome::Applied)
            }
            Command::AddSubStep {
                area,
                strategy,
                text,
            } => Ok(applied_if(Self::edit(store, area, |a| {
                a.add_sub_step(strategy, text)
            })?)),
            Command::RemoveSubStep {
                area,
                strategy,
                index,
            } => {
                let removed = Self::edit(store, area, |a| a.remove_sub_step(strategy, *index))?;
                Ok(applied_if(removed.is_some()))
            }
            Command::SetFinalMilestone {
                area,
                strategy,
                text,
            } => {
                let changed = Self::edit(store, area, |a| match text {
                    Some(text) => a.set_final_milestone(strategy, text),
                    None => a.clear_final_milestone(strategy).is_some(),
                })?;
                Ok(applied_if(changed))
            }
            Command::SetTiming { area, item, timing } => {
                Self::edit(store, area, |a| a.set_action_timing(item, *timing))?;
                Ok(CommandOutcome::Applied)
            }
            Command::SetStatus { area, item, status } => {
                Self::edit(store, area, |a| a.set_action_status(item, *status))?;
                Ok(CommandOutcome::Applied)
            }
            Command::SetFocusAreaStatus { area, status } => {
                Self::edit(store, area, |a| a.status = *status)?;
                Ok(CommandOutcome::Applied)
            }
            other => Err(CommandError::Unsupported(other.kind())),
        }
    }
}

/// Whimsy list edits
#[derive(Debug, Clone, Copy, Default)]
pub struct WhimsyHandler;

impl<S: Storage> CommandHandler<S> for WhimsyHandler {
    fn handle(
        &self,
        store: &RecordStore<S>,
        command: &Command,
    ) -> Result<CommandOutcome, CommandError> {
        match command {
            Command::AddWhimsy { text } => {
                let item = store.add_whimsy(text)?;
                Ok(created_or_ignored(item.map(|i| i.id.to_string())))
            }
            Command::DeleteWhimsy { id } => Ok(applied_if(store.delete_whimsy(id)?)),
            Command::SetWhimsyStatus { id, status } => {
                store.set_whimsy_status(id, *status)?;
                Ok(CommandOutcome::Applied)
            }
            other => Err(CommandError::Unsupported(other.kind())),
        }
    }
}
