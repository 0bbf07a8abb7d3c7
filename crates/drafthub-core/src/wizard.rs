// Draft-creation wizard: five ordered steps over one shared DraftConfig.
//
// The step counter only moves by explicit next/previous. Values live in a
// single record, so leaving a step (or hiding a field) never loses input.
// Validation runs once, at submission, over the whole record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{DraftFormat, DraftTemplate};
use crate::validation::{FieldErrors, FieldIssue};

pub const TOTAL_STEPS: u8 = 5;
pub const MIN_TITLE_LEN: usize = 3;
pub const MIN_PARTICIPANTS: i64 = 2;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    BasicInfo,
    ItemPool,
    TimeSettings,
    Privacy,
    Invitations,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::BasicInfo,
        WizardStep::ItemPool,
        WizardStep::TimeSettings,
        WizardStep::Privacy,
        WizardStep::Invitations,
    ];

    /// 1-based position of the step.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::ItemPool => 2,
            WizardStep::TimeSettings => 3,
            WizardStep::Privacy => 4,
            WizardStep::Invitations => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    /// Short label under the progress marker.
    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Info",
            WizardStep::ItemPool => "Item Pool",
            WizardStep::TimeSettings => "Time Settings",
            WizardStep::Privacy => "Privacy",
            WizardStep::Invitations => "Invitations",
        }
    }

    /// Card title for the step body.
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Draft Information",
            WizardStep::ItemPool => "Define Item Pool",
            WizardStep::TimeSettings => "Time Settings",
            WizardStep::Privacy => "Privacy & Participants",
            WizardStep::Invitations => "Invite Participants",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Set the core details for your draft",
            WizardStep::ItemPool => "Create the list of items that will be available for drafting",
            WizardStep::TimeSettings => "Configure time limits for picks",
            WizardStep::Privacy => "Control who can see and join your draft",
            WizardStep::Invitations => "Invite friends to join your draft",
        }
    }

    fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }
}

/// How a step is drawn in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMarker {
    Completed,
    Current,
    Upcoming,
}

// ---------------------------------------------------------------------------
// Option enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemPoolSource {
    #[default]
    Custom,
    Template,
    Import,
}

impl ItemPoolSource {
    const ALL: [ItemPoolSource; 3] = [ItemPoolSource::Custom, ItemPoolSource::Template, ItemPoolSource::Import];

    pub fn label(&self) -> &'static str {
        match self {
            ItemPoolSource::Custom => "Custom List",
            ItemPoolSource::Template => "Use Template",
            ItemPoolSource::Import => "Import File",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Privacy {
    Public,
    #[default]
    Private,
}

impl Privacy {
    pub fn label(&self) -> &'static str {
        match self {
            Privacy::Public => "Public",
            Privacy::Private => "Private",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Privacy::Public => "Anyone can find and request to join",
            Privacy::Private => "Only people with the link or an invitation can join",
        }
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Every field the wizard collects, across all steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Description,
    Format,
    ItemPoolType,
    CustomItems,
    TemplateId,
    ImportFile,
    PickTimeLimit,
    RoundBreaks,
    BreakDuration,
    AutoPick,
    Privacy,
    MaxParticipants,
    AllowSpectators,
    RequireApproval,
    InvitedUsers,
}

/// What kind of editor a field needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    MultilineText,
    Number,
    Toggle,
    Choice,
    Selection,
}

impl DraftField {
    pub fn kind(&self) -> FieldKind {
        match self {
            DraftField::Title | DraftField::Description | DraftField::ImportFile => FieldKind::Text,
            DraftField::CustomItems => FieldKind::MultilineText,
            DraftField::PickTimeLimit | DraftField::BreakDuration | DraftField::MaxParticipants => {
                FieldKind::Number
            }
            DraftField::RoundBreaks
            | DraftField::AutoPick
            | DraftField::AllowSpectators
            | DraftField::RequireApproval => FieldKind::Toggle,
            DraftField::Format
            | DraftField::ItemPoolType
            | DraftField::TemplateId
            | DraftField::Privacy => FieldKind::Choice,
            DraftField::InvitedUsers => FieldKind::Selection,
        }
    }

    pub fn step(&self) -> WizardStep {
        match self {
            DraftField::Title | DraftField::Description | DraftField::Format => WizardStep::BasicInfo,
            DraftField::ItemPoolType
            | DraftField::CustomItems
            | DraftField::TemplateId
            | DraftField::ImportFile => WizardStep::ItemPool,
            DraftField::PickTimeLimit
            | DraftField::RoundBreaks
            | DraftField::BreakDuration
            | DraftField::AutoPick => WizardStep::TimeSettings,
            DraftField::Privacy
            | DraftField::MaxParticipants
            | DraftField::AllowSpectators
            | DraftField::RequireApproval => WizardStep::Privacy,
            DraftField::InvitedUsers => WizardStep::Invitations,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Title => "Draft Title",
            DraftField::Description => "Description (Optional)",
            DraftField::Format => "Draft Format",
            DraftField::ItemPoolType => "Item Source",
            DraftField::CustomItems => "Custom Items",
            DraftField::TemplateId => "Select Template",
            DraftField::ImportFile => "Import File",
            DraftField::PickTimeLimit => "Pick Time Limit (seconds)",
            DraftField::RoundBreaks => "Round Breaks",
            DraftField::BreakDuration => "Break Duration (seconds)",
            DraftField::AutoPick => "Auto-Pick",
            DraftField::Privacy => "Draft Visibility",
            DraftField::MaxParticipants => "Maximum Participants",
            DraftField::AllowSpectators => "Allow Spectators",
            DraftField::RequireApproval => "Require Approval",
            DraftField::InvitedUsers => "Invite Friends",
        }
    }

    /// Help text under the field, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DraftField::Title => Some("Give your draft a descriptive name"),
            DraftField::CustomItems => Some("Enter each item on a new line"),
            DraftField::TemplateId => Some("Use a pre-defined list of items"),
            DraftField::ImportFile => Some("Path to a CSV or text file with one item per line"),
            DraftField::PickTimeLimit => Some("Time allowed for each pick (0 for no limit)"),
            DraftField::RoundBreaks => Some("Add breaks between draft rounds"),
            DraftField::BreakDuration => Some("Length of break between rounds"),
            DraftField::AutoPick => Some("Automatically select an item when time expires"),
            DraftField::MaxParticipants => Some("Maximum number of people who can join the draft"),
            DraftField::AllowSpectators => Some("Let non-participants view the draft"),
            DraftField::RequireApproval => Some("Approve participants before they can join"),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// DraftConfig
// ---------------------------------------------------------------------------

/// The whole draft-creation form, shared by every step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftConfig {
    pub title: String,
    pub description: String,
    pub format: DraftFormat,
    pub item_pool_type: ItemPoolSource,
    /// One item per line.
    pub custom_items: String,
    pub template_id: Option<String>,
    /// Empty when no file was chosen.
    pub import_file: String,
    pub pick_time_limit: i64,
    pub round_breaks: bool,
    pub break_duration: Option<i64>,
    pub auto_pick: bool,
    pub privacy: Privacy,
    pub max_participants: i64,
    pub allow_spectators: bool,
    pub require_approval: bool,
    pub invited_users: BTreeSet<String>,
}

impl Default for DraftConfig {
    fn default() -> Self {
        DraftConfig {
            title: String::new(),
            description: String::new(),
            format: DraftFormat::Snake,
            item_pool_type: ItemPoolSource::Custom,
            custom_items: String::new(),
            template_id: None,
            import_file: String::new(),
            pick_time_limit: 60,
            round_breaks: false,
            break_duration: Some(300),
            auto_pick: true,
            privacy: Privacy::Private,
            max_participants: 10,
            allow_spectators: true,
            require_approval: false,
            invited_users: BTreeSet::new(),
        }
    }
}

impl DraftConfig {
    /// Check the whole record. Break duration is only required while round
    /// breaks are enabled.
    pub fn validate(&self) -> Result<(), FieldErrors<DraftField>> {
        let mut errors = FieldErrors::new();

        if self.title.chars().count() < MIN_TITLE_LEN {
            errors.push(
                DraftField::Title,
                FieldIssue::TooShort {
                    label: "Title",
                    min: MIN_TITLE_LEN,
                },
            );
        }
        if self.pick_time_limit < 0 {
            errors.push(
                DraftField::PickTimeLimit,
                FieldIssue::BelowMinimum {
                    label: "Pick time limit",
                    min: 0,
                },
            );
        }
        if self.round_breaks {
            match self.break_duration {
                None => errors.push(
                    DraftField::BreakDuration,
                    FieldIssue::Required {
                        label: "Break duration",
                    },
                ),
                Some(d) if d < 0 => errors.push(
                    DraftField::BreakDuration,
                    FieldIssue::BelowMinimum {
                        label: "Break duration",
                        min: 0,
                    },
                ),
                Some(_) => {}
            }
        }
        if self.max_participants < MIN_PARTICIPANTS {
            errors.push(
                DraftField::MaxParticipants,
                FieldIssue::BelowMinimum {
                    label: "Maximum participants",
                    min: MIN_PARTICIPANTS,
                },
            );
        }

        errors.into_result(())
    }

    /// Fields currently shown on `step`, in display order.
    pub fn visible_fields(&self, step: WizardStep) -> Vec<DraftField> {
        match step {
            WizardStep::BasicInfo => vec![DraftField::Title, DraftField::Description, DraftField::Format],
            WizardStep::ItemPool => {
                let source_field = match self.item_pool_type {
                    ItemPoolSource::Custom => DraftField::CustomItems,
                    ItemPoolSource::Template => DraftField::TemplateId,
                    ItemPoolSource::Import => DraftField::ImportFile,
                };
                vec![DraftField::ItemPoolType, source_field]
            }
            WizardStep::TimeSettings => {
                let mut fields = vec![DraftField::PickTimeLimit, DraftField::RoundBreaks];
                if self.round_breaks {
                    fields.push(DraftField::BreakDuration);
                }
                fields.push(DraftField::AutoPick);
                fields
            }
            WizardStep::Privacy => {
                let mut fields = vec![
                    DraftField::Privacy,
                    DraftField::MaxParticipants,
                    DraftField::AllowSpectators,
                ];
                if self.privacy == Privacy::Public {
                    fields.push(DraftField::RequireApproval);
                }
                fields
            }
            WizardStep::Invitations => vec![DraftField::InvitedUsers],
        }
    }

    /// Whether `field` is currently shown on its step.
    pub fn is_visible(&self, field: DraftField) -> bool {
        self.visible_fields(field.step()).contains(&field)
    }

    /// Mutable access to a text field.
    pub fn text_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::Title => Some(&mut self.title),
            DraftField::Description => Some(&mut self.description),
            DraftField::CustomItems => Some(&mut self.custom_items),
            DraftField::ImportFile => Some(&mut self.import_file),
            _ => None,
        }
    }

    /// Mutable access to a numeric field. Editing an unset break duration
    /// starts it from zero.
    pub fn number_mut(&mut self, field: DraftField) -> Option<&mut i64> {
        match field {
            DraftField::PickTimeLimit => Some(&mut self.pick_time_limit),
            DraftField::BreakDuration => Some(self.break_duration.get_or_insert(0)),
            DraftField::MaxParticipants => Some(&mut self.max_participants),
            _ => None,
        }
    }

    /// Flip a switch field. Returns false when `field` is not a switch.
    pub fn toggle(&mut self, field: DraftField) -> bool {
        let flag = match field {
            DraftField::RoundBreaks => &mut self.round_breaks,
            DraftField::AutoPick => &mut self.auto_pick,
            DraftField::AllowSpectators => &mut self.allow_spectators,
            DraftField::RequireApproval => &mut self.require_approval,
            _ => return false,
        };
        *flag = !*flag;
        true
    }

    /// Step a select field to its next (or previous) option, wrapping around.
    /// Returns false when `field` is not a select or has no options.
    pub fn cycle_choice(&mut self, field: DraftField, forward: bool, templates: &[DraftTemplate]) -> bool {
        match field {
            DraftField::Format => {
                self.format = cycle(&DraftFormat::ALL, &self.format, forward);
                true
            }
            DraftField::ItemPoolType => {
                self.item_pool_type = cycle(&ItemPoolSource::ALL, &self.item_pool_type, forward);
                true
            }
            DraftField::Privacy => {
                self.privacy = match self.privacy {
                    Privacy::Public => Privacy::Private,
                    Privacy::Private => Privacy::Public,
                };
                true
            }
            DraftField::TemplateId => {
                if templates.is_empty() {
                    return false;
                }
                let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
                let next = match self.template_id.as_deref() {
                    Some(current) => cycle(&ids, &current, forward),
                    None if forward => ids[0],
                    None => ids[ids.len() - 1],
                }
                .to_string();
                self.template_id = Some(next);
                true
            }
            _ => false,
        }
    }

    /// Toggle membership of a friend in the invite list. Returns whether the
    /// friend is invited afterwards.
    pub fn toggle_invite(&mut self, user_id: &str) -> bool {
        if self.invited_users.remove(user_id) {
            false
        } else {
            self.invited_users.insert(user_id.to_string());
            true
        }
    }

    /// Non-blank lines of the custom item list, trimmed.
    pub fn custom_item_list(&self) -> Vec<&str> {
        self.custom_items
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }

    /// Short join code derived from the title; the same title always yields
    /// the same code.
    pub fn invite_code(&self) -> String {
        const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        // FNV-1a
        let mut hash: u32 = 0x811c_9dc5;
        for b in self.title.trim().to_lowercase().bytes() {
            hash ^= u32::from(b);
            hash = hash.wrapping_mul(0x0100_0193);
        }
        (0..6)
            .map(|_| {
                let c = ALPHABET[(hash % 36) as usize] as char;
                hash /= 36;
                c
            })
            .collect()
    }

    /// Shareable join link for this draft.
    pub fn share_link(&self, share_base: &str) -> String {
        format!("{}/{}", share_base.trim_end_matches('/'), self.invite_code())
    }

    /// Human-readable value of a field for display.
    pub fn display_value(&self, field: DraftField, templates: &[DraftTemplate]) -> String {
        let on_off = |b: bool| (if b { "On" } else { "Off" }).to_string();
        match field {
            DraftField::Title => self.title.clone(),
            DraftField::Description => self.description.clone(),
            DraftField::Format => self.format.label(),
            DraftField::ItemPoolType => self.item_pool_type.label().to_string(),
            DraftField::CustomItems => self.custom_items.clone(),
            DraftField::TemplateId => self
                .template_id
                .as_deref()
                .map(|id| {
                    templates
                        .iter()
                        .find(|t| t.id == id)
                        .map_or_else(|| id.to_string(), |t| t.name.clone())
                })
                .unwrap_or_else(|| "Choose a template".to_string()),
            DraftField::ImportFile => self.import_file.clone(),
            DraftField::PickTimeLimit => self.pick_time_limit.to_string(),
            DraftField::RoundBreaks => on_off(self.round_breaks),
            DraftField::BreakDuration => self
                .break_duration
                .map_or_else(String::new, |d| d.to_string()),
            DraftField::AutoPick => on_off(self.auto_pick),
            DraftField::Privacy => self.privacy.label().to_string(),
            DraftField::MaxParticipants => self.max_participants.to_string(),
            DraftField::AllowSpectators => on_off(self.allow_spectators),
            DraftField::RequireApproval => on_off(self.require_approval),
            DraftField::InvitedUsers => format!("{} friends selected", self.invited_users.len()),
        }
    }
}

/// Next (or previous) element after `current` in `options`, wrapping.
fn cycle<T: Copy + PartialEq>(options: &[T], current: &T, forward: bool) -> T {
    let len = options.len();
    let idx = options.iter().position(|o| o == current).unwrap_or(0);
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    options[next]
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("the draft can only be created from the last step")]
    NotAtFinalStep,

    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors<DraftField>),
}

/// Step counter plus the shared form record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDraftWizard {
    step: WizardStep,
    config: DraftConfig,
    errors: FieldErrors<DraftField>,
}

impl Default for CreateDraftWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateDraftWizard {
    pub fn new() -> Self {
        Self::with_config(DraftConfig::default())
    }

    pub fn with_config(config: DraftConfig) -> Self {
        CreateDraftWizard {
            step: WizardStep::BasicInfo,
            config,
            errors: FieldErrors::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DraftConfig {
        &mut self.config
    }

    /// Messages from the last failed submission.
    pub fn errors(&self) -> &FieldErrors<DraftField> {
        &self.errors
    }

    /// Advance one step. No validation happens here.
    pub fn next(&mut self) -> bool {
        match self.step.next() {
            Some(step) => {
                debug!("Wizard step {} -> {}", self.step.number(), step.number());
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.step.previous() {
            Some(step) => {
                debug!("Wizard step {} -> {}", self.step.number(), step.number());
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Cancel is offered instead of "Previous" on the first step only.
    pub fn can_cancel(&self) -> bool {
        self.step == WizardStep::BasicInfo
    }

    /// Submit is offered instead of "Next" on the last step only.
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::Invitations
    }

    /// Validate and hand back the full record for the submit callback.
    ///
    /// On failure the messages are kept on the wizard and the step does not
    /// change.
    pub fn submit(&mut self) -> Result<DraftConfig, SubmitError> {
        if !self.can_submit() {
            return Err(SubmitError::NotAtFinalStep);
        }
        match self.config.validate() {
            Ok(()) => {
                self.errors = FieldErrors::new();
                info!(
                    "Draft \"{}\" submitted ({}, {} invited)",
                    self.config.title,
                    self.config.format,
                    self.config.invited_users.len()
                );
                Ok(self.config.clone())
            }
            Err(errors) => {
                warn!("Draft submission rejected: {} invalid field(s)", errors.len());
                self.errors = errors.clone();
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    /// Fraction of the wizard reached, `step / 5`.
    pub fn progress(&self) -> f64 {
        f64::from(self.step.number()) / f64::from(TOTAL_STEPS)
    }

    pub fn marker(&self, step: WizardStep) -> StepMarker {
        if step < self.step {
            StepMarker::Completed
        } else if step == self.step {
            StepMarker::Current
        } else {
            StepMarker::Upcoming
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
