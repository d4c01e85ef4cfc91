//! Ordered pipeline description derived from a filter state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filter::params::{FilterParameter, FilterParams, ParameterId, Unit};

/// One image-adjustment primitive with its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineTerm {
    pub id: ParameterId,
    pub value: f32,
    pub unit: Unit,
}

impl PipelineTerm {
    /// Whether applying this term leaves pixels unchanged.
    pub fn is_neutral(&self) -> bool {
        self.value == FilterParams::NEUTRAL.get(self.id)
    }
}

impl From<FilterParameter> for PipelineTerm {
    fn from(p: FilterParameter) -> Self {
        Self {
            id: p.id,
            value: p.value,
            unit: p.unit,
        }
    }
}

impl fmt::Display for PipelineTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}{})", self.id.css_name(), self.value, self.unit.suffix())
    }
}

/// The six terms in fixed order: contrast, saturate, brightness, sepia,
/// hue-rotate, blur.
///
/// Recomputed from [`FilterState`](crate::filter::state::FilterState) on
/// demand; it carries no identity of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineDescription {
    terms: [PipelineTerm; 6],
}

impl PipelineDescription {
    /// Build from a parameter set. Order comes from [`ParameterId::ORDER`],
    /// never from the order values were written in.
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            terms: params.to_parameters().map(PipelineTerm::from),
        }
    }

    /// The pass-through pipeline.
    pub fn neutral() -> Self {
        Self::from_params(&FilterParams::NEUTRAL)
    }

    /// Terms in application order.
    pub fn terms(&self) -> &[PipelineTerm; 6] {
        &self.terms
    }

    /// Value of one term.
    pub fn value(&self, id: ParameterId) -> f32 {
        self.terms[id.index()].value
    }

    /// Back to a flat parameter set.
    pub fn params(&self) -> FilterParams {
        let mut params = FilterParams::NEUTRAL;
        for term in &self.terms {
            params.set(term.id, term.value);
        }
        params
    }

    /// Whether every term is neutral.
    pub fn is_identity(&self) -> bool {
        self.terms.iter().all(PipelineTerm::is_neutral)
    }

    /// CSS `filter` property value, e.g.
    /// `contrast(1.3) saturate(0.6) ... hue-rotate(-15deg) blur(0px)`.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PipelineDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
