//! The matching engine: filter, score, and present.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use eduforge_core::{DomainError, DomainResult, ProgramId, TenantId};
use eduforge_programs::{Program, ProgramStore};
use eduforge_schema::{render_value, EligibilityField, FlatField};

use crate::predicate::{evaluate, Satisfaction};

/// One matched program with its coverage score (0–100: the percentage of
/// eligibility criteria the student strictly satisfies; every criterion
/// weighs the same).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramMatch {
    pub program: Program,
    pub match_score: u8,
}

/// Presentation-ready card so the consuming chat surface renders without
/// re-deriving display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCard {
    pub title: String,
    pub university: String,
    pub details: Vec<String>,
    pub match_score: u8,
    pub cta: CallToAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToAction {
    pub label: String,
    pub program_id: ProgramId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiDescriptor {
    #[serde(rename = "type")]
    pub descriptor_type: &'static str,
    pub programs: Vec<ProgramCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub programs: Vec<ProgramMatch>,
    pub total_results: usize,
    pub ui: UiDescriptor,
}

/// How many detail lines a card carries.
const CARD_DETAIL_LIMIT: usize = 3;

/// Match a student's answers against a tenant's programs.
///
/// `criteria` is the tenant's eligibility schema; an empty one is a
/// configuration error (`NotConfigured`), deliberately distinguishable from
/// "no program matched". `schema_fields` is the tenant's flattened schema,
/// used only to render display values on the cards. Candidates are evaluated
/// newest-first (the store's list order); a program survives when no
/// criterion is strictly unsatisfied.
pub fn match_programs<S: ProgramStore + ?Sized>(
    tenant_id: TenantId,
    criteria: &[EligibilityField],
    answers: &BTreeMap<String, Value>,
    schema_fields: &BTreeMap<String, FlatField>,
    store: &S,
) -> DomainResult<MatchOutcome> {
    if criteria.is_empty() {
        return Err(DomainError::not_configured(
            "no eligibility criteria defined for this organization",
        ));
    }

    let mut matches = Vec::new();

    for program in store.list(tenant_id) {
        // The store is tenant-keyed already; the scoping check stays anyway.
        if program.organization_id != tenant_id || !program.is_active {
            continue;
        }

        let mut satisfied = 0usize;
        let mut excluded = false;

        for criterion in criteria {
            let student = answers.get(&criterion.name);
            let stored = program.field_value(&criterion.name);
            match evaluate(criterion, student, stored) {
                Satisfaction::Satisfied => satisfied += 1,
                Satisfaction::Unsatisfied => {
                    excluded = true;
                    break;
                }
                Satisfaction::Indeterminate(reason) => {
                    warn!(
                        field = %criterion.name,
                        program = %program.id,
                        reason,
                        "eligibility criterion passed fail-open"
                    );
                }
            }
        }

        if !excluded {
            matches.push(ProgramMatch {
                match_score: score(satisfied, criteria.len()),
                program,
            });
        }
    }

    let cards = matches
        .iter()
        .map(|m| card(m, criteria, schema_fields))
        .collect();

    Ok(MatchOutcome {
        total_results: matches.len(),
        ui: UiDescriptor {
            descriptor_type: "programList",
            programs: cards,
        },
        programs: matches,
    })
}

fn score(satisfied: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((satisfied as f64 / total as f64) * 100.0).round() as u8
}

fn card(
    m: &ProgramMatch,
    criteria: &[EligibilityField],
    schema_fields: &BTreeMap<String, FlatField>,
) -> ProgramCard {
    let definition_of = |name: &str| schema_fields.get(name).map(|flat| &flat.field);

    let university = render_value(m.program.field_value("university"), definition_of("university"));

    let details = criteria
        .iter()
        .take(CARD_DETAIL_LIMIT)
        .map(|criterion| {
            let rendered = render_value(
                m.program.field_value(&criterion.name),
                definition_of(&criterion.name),
            );
            format!("{}: {rendered}", criterion.label)
        })
        .collect();

    ProgramCard {
        title: m.program.name.clone(),
        university,
        details,
        match_score: m.match_score,
        cta: CallToAction {
            label: "View details".to_string(),
            program_id: m.program.id,
        },
    }
}
