//! Estimators that can appear in a serialized model artifact.
//!
//! Every estimator reduces a feature row to P(risk = 1); the label is taken
//! from that probability by [`RiskLabel::from_probability`].

use crate::domain::model::{RiskLabel, FEATURE_COUNT};
use crate::utils::error::{CardioError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Flat node array; node 0 is the root and children always follow their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    pub fn leaf_value(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    fn validate(&self, context: &str) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(invalid(format!("{}: tree has no nodes", context)));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(invalid(format!(
                            "{}: node {} splits on feature {} (only {} features)",
                            context, idx, feature, FEATURE_COUNT
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!(
                            "{}: node {} has a non-finite threshold",
                            context, idx
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(invalid(format!(
                                "{}: node {} points to invalid child {}",
                                context, idx, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(format!(
                            "{}: leaf {} has a non-finite value",
                            context, idx
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingKind {
    Soft,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    DecisionTree(Tree),
    GradientBoosting {
        base_score: f64,
        learning_rate: f64,
        trees: Vec<Tree>,
    },
    Voting {
        voting: VotingKind,
        estimators: Vec<Estimator>,
        #[serde(default)]
        weights: Option<Vec<f64>>,
    },
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::LogisticRegression { .. } => "logistic_regression",
            Estimator::DecisionTree(_) => "decision_tree",
            Estimator::GradientBoosting { .. } => "gradient_boosting",
            Estimator::Voting { .. } => "voting",
        }
    }

    /// P(risk = 1) for one preprocessed row. May be non-finite for extreme inputs.
    pub fn predict_proba(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        match self {
            Estimator::LogisticRegression {
                coefficients,
                intercept,
            } => {
                let z = coefficients
                    .iter()
                    .zip(x.iter())
                    .map(|(w, v)| w * v)
                    .sum::<f64>()
                    + intercept;
                sigmoid(z)
            }
            Estimator::DecisionTree(tree) => tree.leaf_value(x),
            Estimator::GradientBoosting {
                base_score,
                learning_rate,
                trees,
            } => {
                let raw = trees.iter().map(|t| t.leaf_value(x)).sum::<f64>();
                sigmoid(base_score + learning_rate * raw)
            }
            Estimator::Voting {
                voting,
                estimators,
                weights,
            } => {
                let mut total_weight = 0.0;
                let mut acc = 0.0;
                for (i, member) in estimators.iter().enumerate() {
                    let w = weights.as_ref().map(|ws| ws[i]).unwrap_or(1.0);
                    let p = member.predict_proba(x);
                    let vote = match voting {
                        VotingKind::Soft => p,
                        VotingKind::Hard => {
                            if p.is_nan() {
                                return f64::NAN;
                            }
                            match RiskLabel::from_probability(p) {
                                RiskLabel::Risk => 1.0,
                                RiskLabel::NoRisk => 0.0,
                            }
                        }
                    };
                    acc += w * vote;
                    total_weight += w;
                }
                acc / total_weight
            }
        }
    }

    pub fn validate(&self, context: &str) -> Result<()> {
        match self {
            Estimator::LogisticRegression {
                coefficients,
                intercept,
            } => {
                check_len(context, "coefficients", coefficients.len())?;
                if coefficients.iter().any(|c| !c.is_finite()) || !intercept.is_finite() {
                    return Err(invalid(format!(
                        "{}: logistic regression has non-finite parameters",
                        context
                    )));
                }
                Ok(())
            }
            Estimator::DecisionTree(tree) => tree.validate(context),
            Estimator::GradientBoosting {
                base_score,
                learning_rate,
                trees,
            } => {
                if !base_score.is_finite() || !learning_rate.is_finite() || *learning_rate <= 0.0
                {
                    return Err(invalid(format!(
                        "{}: gradient boosting needs a finite base_score and a positive learning_rate",
                        context
                    )));
                }
                if trees.is_empty() {
                    return Err(invalid(format!("{}: gradient boosting has no trees", context)));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(&format!("{}.trees[{}]", context, i))?;
                }
                Ok(())
            }
            Estimator::Voting {
                estimators,
                weights,
                ..
            } => {
                if estimators.is_empty() {
                    return Err(invalid(format!("{}: voting ensemble is empty", context)));
                }
                if let Some(weights) = weights {
                    if weights.len() != estimators.len() {
                        return Err(invalid(format!(
                            "{}: {} weights for {} estimators",
                            context,
                            weights.len(),
                            estimators.len()
                        )));
                    }
                    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(invalid(format!(
                            "{}: weights must be finite and non-negative",
                            context
                        )));
                    }
                    if weights.iter().sum::<f64>() <= 0.0 {
                        return Err(invalid(format!("{}: weights sum to zero", context)));
                    }
                }
                for (i, member) in estimators.iter().enumerate() {
                    member.validate(&format!("{}.estimators[{}]", context, i))?;
                }
                Ok(())
            }
        }
    }
}

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

pub(crate) fn check_len(context: &str, field: &str, len: usize) -> Result<()> {
    if len != FEATURE_COUNT {
        return Err(invalid(format!(
            "{}: {} has {} entries, expected {}",
            context, field, len, FEATURE_COUNT
        )));
    }
    Ok(())
}

pub(crate) fn invalid(message: String) -> CardioError {
    CardioError::InvalidModelError { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: [f64; FEATURE_COUNT] =
        [50.0, 1.0, 170.0, 70.0, 120.0, 80.0, 1.0, 1.0, 0.0, 0.0, 1.0, 24.2];

    // ap_hi (index 4) > 140 → high risk leaf
    fn bp_stump(low: f64, high: f64) -> Vec<TreeNode> {
        vec![
            TreeNode::Split {
                feature: 4,
                threshold: 140.0,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { value: low },
            TreeNode::Leaf { value: high },
        ]
    }

    fn logistic(intercept: f64) -> Estimator {
        Estimator::LogisticRegression {
            coefficients: vec![0.0; FEATURE_COUNT],
            intercept,
        }
    }

    #[test]
    fn test_logistic_regression() {
        assert!((logistic(0.0).predict_proba(&ROW) - 0.5).abs() < 1e-12);
        assert!(logistic(3.0).predict_proba(&ROW) > 0.9);
        assert!(logistic(-3.0).predict_proba(&ROW) < 0.1);
    }

    #[test]
    fn test_decision_tree_goes_left_on_equal() {
        let tree = Estimator::DecisionTree(Tree {
            nodes: bp_stump(0.2, 0.8),
        });
        assert_eq!(tree.predict_proba(&ROW), 0.2);

        let mut hypertensive = ROW;
        hypertensive[4] = 140.0;
        assert_eq!(tree.predict_proba(&hypertensive), 0.2);
        hypertensive[4] = 160.0;
        assert_eq!(tree.predict_proba(&hypertensive), 0.8);
    }

    #[test]
    fn test_gradient_boosting_sums_trees() {
        let model = Estimator::GradientBoosting {
            base_score: 0.0,
            learning_rate: 0.5,
            trees: vec![
                Tree {
                    nodes: bp_stump(-1.0, 2.0),
                },
                Tree {
                    nodes: bp_stump(-1.0, 2.0),
                },
            ],
        };
        // 0.5 * (-2) = -1
        assert!((model.predict_proba(&ROW) - sigmoid(-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_soft_and_hard_voting() {
        let members = vec![logistic(2.0), logistic(-0.5), logistic(-0.5)];
        let soft = Estimator::Voting {
            voting: VotingKind::Soft,
            estimators: members.clone(),
            weights: None,
        };
        let hard = Estimator::Voting {
            voting: VotingKind::Hard,
            estimators: members.clone(),
            weights: None,
        };
        // soft: mean(0.88, 0.38, 0.38) > 0.5, hard: one vote of three
        assert!(soft.predict_proba(&ROW) > 0.5);
        assert!(hard.predict_proba(&ROW) < 0.5);

        let weighted = Estimator::Voting {
            voting: VotingKind::Hard,
            estimators: members,
            weights: Some(vec![3.0, 1.0, 1.0]),
        };
        assert!(weighted.predict_proba(&ROW) > 0.5);
    }

    #[test]
    fn test_hard_voting_tie_is_no_risk() {
        let tie = Estimator::Voting {
            voting: VotingKind::Hard,
            estimators: vec![logistic(2.0), logistic(-2.0)],
            weights: None,
        };
        let p = tie.predict_proba(&ROW);
        assert_eq!(RiskLabel::from_probability(p), RiskLabel::NoRisk);
    }

    #[test]
    fn test_validate_rejects_bad_trees() {
        let backwards = Estimator::DecisionTree(Tree {
            nodes: vec![
                TreeNode::Leaf { value: 0.1 },
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 0,
                },
            ],
        });
        assert!(backwards.validate("estimator").is_err());

        let bad_feature = Estimator::DecisionTree(Tree {
            nodes: vec![
                TreeNode::Split {
                    feature: FEATURE_COUNT,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 0.1 },
                TreeNode::Leaf { value: 0.9 },
            ],
        });
        assert!(bad_feature.validate("estimator").is_err());

        let empty = Estimator::DecisionTree(Tree { nodes: vec![] });
        assert!(empty.validate("estimator").is_err());
    }

    #[test]
    fn test_validate_voting() {
        let empty = Estimator::Voting {
            voting: VotingKind::Soft,
            estimators: vec![],
            weights: None,
        };
        assert!(empty.validate("estimator").is_err());

        let mismatched = Estimator::Voting {
            voting: VotingKind::Soft,
            estimators: vec![logistic(0.0)],
            weights: Some(vec![1.0, 1.0]),
        };
        assert!(mismatched.validate("estimator").is_err());

        let zero = Estimator::Voting {
            voting: VotingKind::Soft,
            estimators: vec![logistic(0.0)],
            weights: Some(vec![0.0]),
        };
        assert!(zero.validate("estimator").is_err());

        let short = Estimator::LogisticRegression {
            coefficients: vec![1.0; 3],
            intercept: 0.0,
        };
        assert!(short.validate("estimator").is_err());
    }

    #[test]
    fn test_estimator_json_shape() {
        let json = r#"{
            "type": "voting",
            "voting": "soft",
            "estimators": [
                {"type": "decision_tree", "nodes": [
                    {"split": {"feature": 4, "threshold": 140.0, "left": 1, "right": 2}},
                    {"leaf": {"value": 0.2}},
                    {"leaf": {"value": 0.8}}
                ]},
                {"type": "logistic_regression", "coefficients": [0,0,0,0,0,0,0,0,0,0,0,0], "intercept": 0.0}
            ]
        }"#;
        let estimator: Estimator = serde_json::from_str(json).unwrap();
        assert_eq!(estimator.kind(), "voting");
        assert!(estimator.validate("estimator").is_ok());
    }
}
