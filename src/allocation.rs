//! Reliability allocation
//!
//! A parent's goal is apportioned to its children by one of four methods.
//! Every method ends by deriving the same three outputs through
//! `MTBF = 1/λ` and `R = exp(-λ t)`.
//!
//! | Id | Method | Goal used |
//! |----|--------|-----------|
//! | 1  | Equal  | reliability |
//! | 2  | AGREE  | reliability |
//! | 3  | ARINC  | hazard rate |
//! | 4  | Feasibility of objectives | hazard rate |

use crate::error::{AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMethod {
    Equal,
    Agree,
    Arinc,
    Foo,
}

impl AllocationMethod {
    pub fn from_id(allocation_method_id: i64) -> Result<Self> {
        match allocation_method_id {
            1 => Ok(AllocationMethod::Equal),
            2 => Ok(AllocationMethod::Agree),
            3 => Ok(AllocationMethod::Arinc),
            4 => Ok(AllocationMethod::Foo),
            _ => Err(AnalysisError::lookup(
                "allocation methods",
                allocation_method_id,
            )),
        }
    }
}

/// Which goal measure a record states authoritatively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GoalMeasure {
    Reliability,
    HazardRate,
    Mtbf,
}

impl GoalMeasure {
    pub fn from_id(goal_measure_id: i64) -> Result<Self> {
        match goal_measure_id {
            1 => Ok(GoalMeasure::Reliability),
            2 => Ok(GoalMeasure::HazardRate),
            3 => Ok(GoalMeasure::Mtbf),
            _ => Err(AnalysisError::lookup("goal measures", goal_measure_id)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Goals {
    #[serde(default)]
    pub reliability_goal: f64,
    #[serde(default)]
    pub hazard_rate_goal: f64,
    #[serde(default)]
    pub mtbf_goal: f64,
}

/// Derive the two missing goal measures from the authoritative one
pub fn calculate_goals(measure: GoalMeasure, goals: &Goals, mission_time: f64) -> Result<Goals> {
    match measure {
        GoalMeasure::Reliability => {
            let r = goals.reliability_goal;
            if !(r > 0.0 && r < 1.0) {
                return Err(AnalysisError::range("reliability_goal", r, "(0, 1)"));
            }
            let mtbf_goal = -mission_time / r.ln();
            Ok(Goals {
                reliability_goal: r,
                hazard_rate_goal: 1.0 / mtbf_goal,
                mtbf_goal,
            })
        }
        GoalMeasure::HazardRate => {
            let h = goals.hazard_rate_goal;
            if h <= 0.0 {
                return Err(AnalysisError::range("hazard_rate_goal", h, "> 0"));
            }
            let mtbf_goal = 1.0 / h;
            Ok(Goals {
                reliability_goal: (-mission_time / mtbf_goal).exp(),
                hazard_rate_goal: h,
                mtbf_goal,
            })
        }
        GoalMeasure::Mtbf => {
            let m = goals.mtbf_goal;
            if m <= 0.0 {
                return Err(AnalysisError::range("mtbf_goal", m, "> 0"));
            }
            Ok(Goals {
                reliability_goal: (-mission_time / m).exp(),
                hazard_rate_goal: 1.0 / m,
                mtbf_goal: m,
            })
        }
    }
}

/// The goal a method apportions: reliability for equal/AGREE, hazard rate
/// for ARINC/FOO
pub fn get_allocation_goal(method: AllocationMethod, goals: &Goals) -> f64 {
    match method {
        AllocationMethod::Equal | AllocationMethod::Agree => goals.reliability_goal,
        AllocationMethod::Arinc | AllocationMethod::Foo => goals.hazard_rate_goal,
    }
}

/// Allocated values for one child
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Allocated {
    pub weight_factor: f64,
    pub percent_weight_factor: f64,
    pub hazard_rate_alloc: f64,
    pub mtbf_alloc: f64,
    pub reliability_alloc: f64,
}

impl Allocated {
    fn from_hazard_rate(hazard_rate_alloc: f64, mission_time: f64) -> Result<Self> {
        if hazard_rate_alloc <= 0.0 {
            return Err(AnalysisError::DegenerateInput(format!(
                "allocated hazard rate {} has no finite MTBF",
                hazard_rate_alloc
            )));
        }
        Ok(Allocated {
            hazard_rate_alloc,
            mtbf_alloc: 1.0 / hazard_rate_alloc,
            reliability_alloc: (-hazard_rate_alloc * mission_time).exp(),
            ..Default::default()
        })
    }
}

/// One child of the item being allocated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AllocationChild {
    #[serde(default = "default_mission_time")]
    pub mission_time: f64,
    /// Percent of mission time the child operates
    #[serde(default = "default_duty_cycle")]
    pub duty_cycle: f64,
    /// Current predicted hazard rate
    #[serde(default)]
    pub hazard_rate: f64,
    #[serde(default = "default_count")]
    pub n_sub_systems: u32,
    #[serde(default = "default_count")]
    pub n_sub_elements: u32,
    /// AGREE importance factor
    #[serde(default = "default_weight")]
    pub weight_factor: f64,
    #[serde(default = "default_count")]
    pub int_factor: u32,
    #[serde(default = "default_count")]
    pub soa_factor: u32,
    #[serde(default = "default_count")]
    pub op_time_factor: u32,
    #[serde(default = "default_count")]
    pub env_factor: u32,
}

fn default_mission_time() -> f64 {
    100.0
}

fn default_duty_cycle() -> f64 {
    100.0
}

fn default_count() -> u32 {
    1
}

fn default_weight() -> f64 {
    1.0
}

impl Default for AllocationChild {
    fn default() -> Self {
        Self {
            mission_time: default_mission_time(),
            duty_cycle: default_duty_cycle(),
            hazard_rate: 0.0,
            n_sub_systems: 1,
            n_sub_elements: 1,
            weight_factor: 1.0,
            int_factor: 1,
            soa_factor: 1,
            op_time_factor: 1,
            env_factor: 1,
        }
    }
}

impl AllocationChild {
    /// Feasibility-of-objectives weight: the product of the four ratings,
    /// each of which must lie in [1, 10]
    pub fn foo_weight(&self) -> Result<u32> {
        let ratings = [
            ("int_factor", self.int_factor),
            ("soa_factor", self.soa_factor),
            ("op_time_factor", self.op_time_factor),
            ("env_factor", self.env_factor),
        ];
        let mut weight = 1;
        for (field, rating) in ratings {
            if !(1..=10).contains(&rating) {
                return Err(AnalysisError::range(field, f64::from(rating), "[1, 10]"));
            }
            weight *= rating;
        }
        Ok(weight)
    }
}

pub fn allocate_equal(
    n_children: usize,
    reliability_goal: f64,
    mission_time: f64,
) -> Result<Allocated> {
    if n_children == 0 {
        return Err(AnalysisError::DegenerateInput(
            "equal allocation needs at least one child".to_string(),
        ));
    }
    let weight_factor = 1.0 / n_children as f64;
    let reliability_alloc = reliability_goal.powf(weight_factor);
    let hazard_rate_alloc = -reliability_alloc.ln() / mission_time;
    let mut allocated = Allocated::from_hazard_rate(hazard_rate_alloc, mission_time)?;
    allocated.weight_factor = weight_factor;
    Ok(allocated)
}

pub fn allocate_agree(
    child: &AllocationChild,
    n_children: usize,
    reliability_goal: f64,
) -> Result<Allocated> {
    if !(reliability_goal > 0.0 && reliability_goal < 1.0) {
        return Err(AnalysisError::range("reliability_goal", reliability_goal, "(0, 1)"));
    }
    if child.n_sub_elements == 0 {
        return Err(AnalysisError::range("n_sub_elements", 0.0, ">= 1"));
    }
    let time_i = child.mission_time * child.duty_cycle / 100.0;
    let mtbf_alloc = (n_children as f64 * child.weight_factor * time_i)
        / (-f64::from(child.n_sub_elements) * reliability_goal.ln());
    let mut allocated = Allocated::from_hazard_rate(1.0 / mtbf_alloc, child.mission_time)?;
    allocated.weight_factor = child.weight_factor;
    Ok(allocated)
}

pub fn allocate_arinc(
    child: &AllocationChild,
    system_hazard_rate: f64,
    hazard_rate_goal: f64,
) -> Result<Allocated> {
    if system_hazard_rate == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "ARINC allocation with a system hazard rate of zero".to_string(),
        ));
    }
    let weight_factor = child.hazard_rate / system_hazard_rate;
    let mut allocated =
        Allocated::from_hazard_rate(weight_factor * hazard_rate_goal, child.mission_time)?;
    allocated.weight_factor = weight_factor;
    Ok(allocated)
}

/// Sum of the feasibility-of-objectives weights of all children
pub fn calculate_foo_cumulative_weight(children: &[AllocationChild]) -> Result<u32> {
    children.iter().try_fold(0u32, |total, child| {
        let weight = child.foo_weight()?;
        total.checked_add(weight).ok_or_else(|| {
            AnalysisError::DegenerateInput(
                "feasibility of objectives cumulative weight overflows".to_string(),
            )
        })
    })
}

pub fn allocate_foo(
    child: &AllocationChild,
    cumulative_weight: u32,
    hazard_rate_goal: f64,
) -> Result<Allocated> {
    if cumulative_weight == 0 {
        return Err(AnalysisError::DegenerateInput(
            "feasibility of objectives allocation with zero cumulative weight".to_string(),
        ));
    }
    let weight_factor = f64::from(child.foo_weight()?);
    let percent_weight_factor = weight_factor / f64::from(cumulative_weight);
    let mut allocated = Allocated::from_hazard_rate(
        percent_weight_factor * hazard_rate_goal,
        child.mission_time,
    )?;
    allocated.weight_factor = weight_factor;
    allocated.percent_weight_factor = percent_weight_factor;
    Ok(allocated)
}

/// The item whose goal is being apportioned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AllocationParent {
    pub allocation_method_id: i64,
    pub goal_measure_id: i64,
    #[serde(flatten)]
    pub goals: Goals,
    #[serde(default = "default_mission_time")]
    pub mission_time: f64,
    /// Current system hazard rate (ARINC)
    #[serde(default)]
    pub hazard_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AllocationResult {
    pub goals: Goals,
    pub cumulative_weight: u32,
    pub children: Vec<Allocated>,
}

/// Normalise the parent's goals and apportion them to every child
pub fn do_allocate(
    parent: &AllocationParent,
    children: &[AllocationChild],
) -> Result<AllocationResult> {
    let method = AllocationMethod::from_id(parent.allocation_method_id)?;
    let measure = GoalMeasure::from_id(parent.goal_measure_id)?;
    let goals = calculate_goals(measure, &parent.goals, parent.mission_time)?;
    let goal = get_allocation_goal(method, &goals);
    let cumulative_weight = match method {
        AllocationMethod::Foo => calculate_foo_cumulative_weight(children)?,
        _ => 0,
    };

    let allocated = children
        .iter()
        .map(|child| match method {
            AllocationMethod::Equal => allocate_equal(children.len(), goal, child.mission_time),
            AllocationMethod::Agree => allocate_agree(child, children.len(), goal),
            AllocationMethod::Arinc => allocate_arinc(child, parent.hazard_rate, goal),
            AllocationMethod::Foo => allocate_foo(child, cumulative_weight, goal),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AllocationResult {
        goals,
        cumulative_weight,
        children: allocated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs()
    }

    #[test]
    fn test_goals_from_reliability() {
        let goals = Goals {
            reliability_goal: 0.99732259,
            ..Default::default()
        };
        let g = calculate_goals(GoalMeasure::Reliability, &goals, 100.0).unwrap();
        assert!(approx(g.hazard_rate_goal, 0.00002681));
        assert!(approx(g.mtbf_goal, 37299.5151063));
    }

    #[test]
    fn test_goals_from_hazard_rate_and_mtbf() {
        let goals = Goals {
            hazard_rate_goal: 0.00002681,
            mtbf_goal: 37300.0,
            ..Default::default()
        };
        let g = calculate_goals(GoalMeasure::HazardRate, &goals, 100.0).unwrap();
        assert!(approx(g.mtbf_goal, 37299.5151063));
        assert!(approx(g.reliability_goal, 0.99732259));
        let g = calculate_goals(GoalMeasure::Mtbf, &goals, 100.0).unwrap();
        assert!(approx(g.hazard_rate_goal, 2.68096515e-05));
        assert!(approx(g.reliability_goal, 0.99732259));
    }

    #[test]
    fn test_goals_reject_degenerate() {
        let goals = Goals::default();
        assert!(calculate_goals(GoalMeasure::Reliability, &goals, 100.0).is_err());
        assert!(calculate_goals(GoalMeasure::HazardRate, &goals, 100.0).is_err());
        assert!(calculate_goals(GoalMeasure::Mtbf, &goals, 100.0).is_err());
    }

    #[test]
    fn test_goal_selection() {
        let goals = Goals {
            reliability_goal: 0.9,
            hazard_rate_goal: 0.001,
            mtbf_goal: 1000.0,
        };
        assert_eq!(get_allocation_goal(AllocationMethod::Equal, &goals), 0.9);
        assert_eq!(get_allocation_goal(AllocationMethod::Agree, &goals), 0.9);
        assert_eq!(get_allocation_goal(AllocationMethod::Arinc, &goals), 0.001);
        assert_eq!(get_allocation_goal(AllocationMethod::Foo, &goals), 0.001);
    }

    #[test]
    fn test_equal() {
        let a = allocate_equal(1, 0.995, 100.0).unwrap();
        assert!(approx(a.hazard_rate_alloc, 5.012542e-05));
        assert!(approx(a.mtbf_alloc, 19949.9582288));
        assert!(approx(a.reliability_alloc, 0.995));

        let a = allocate_equal(2, 0.995, 100.0).unwrap();
        assert!(approx(a.reliability_alloc, 0.997_496_867_163));
        assert!(approx(a.hazard_rate_alloc, 2.506_270_911_772_185_3e-5));
        assert!(allocate_equal(0, 0.995, 100.0).is_err());
    }

    #[test]
    fn test_agree() {
        let child = AllocationChild {
            mission_time: 100.0,
            duty_cycle: 90.0,
            n_sub_systems: 6,
            n_sub_elements: 2,
            weight_factor: 0.95,
            ..Default::default()
        };
        let a = allocate_agree(&child, 2, 0.717).unwrap();
        assert!(approx(a.mtbf_alloc, 257.004_161_169_983_7));
        assert!(approx(a.hazard_rate_alloc, 0.003_890_987_583_421_248_6));
        assert!(approx(a.reliability_alloc, 0.677_667_341_405_996_9));
        assert!(allocate_agree(&child, 2, 1.0).is_err());
    }

    #[test]
    fn test_arinc() {
        let child = AllocationChild {
            hazard_rate: 0.000628,
            ..Default::default()
        };
        let a = allocate_arinc(&child, 0.002681, 0.000617).unwrap();
        assert!(approx(a.hazard_rate_alloc, 0.0001445267));
        assert!(approx(a.mtbf_alloc, 6919.1382176));
        assert!(approx(a.reliability_alloc, 0.9856513));
        assert!(matches!(
            allocate_arinc(&child, 0.0, 0.000617),
            Err(AnalysisError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_foo() {
        let children = [
            AllocationChild {
                int_factor: 3,
                soa_factor: 2,
                op_time_factor: 9,
                env_factor: 6,
                ..Default::default()
            },
            AllocationChild {
                int_factor: 4,
                soa_factor: 5,
                op_time_factor: 10,
                env_factor: 3,
                ..Default::default()
            },
        ];
        assert_eq!(children[0].foo_weight().unwrap(), 324);
        assert_eq!(children[1].foo_weight().unwrap(), 600);
        let cumulative = calculate_foo_cumulative_weight(&children).unwrap();
        assert_eq!(cumulative, 924);

        let a = allocate_foo(&children[0], cumulative, 0.000617).unwrap();
        assert!(approx(a.hazard_rate_alloc, 0.0002163506));
        assert!(approx(a.mtbf_alloc, 4622.126178));
        assert!(approx(a.reliability_alloc, 0.9785973));
        assert!(allocate_foo(&children[0], 0, 0.000617).is_err());
    }

    #[test]
    fn test_foo_rating_out_of_range() {
        let child = AllocationChild {
            int_factor: 70000,
            soa_factor: 70000,
            ..Default::default()
        };
        let err = child.foo_weight().unwrap_err();
        assert_eq!(err.field(), Some("int_factor"));

        let zero_env = AllocationChild {
            env_factor: 0,
            ..Default::default()
        };
        let err = calculate_foo_cumulative_weight(&[AllocationChild::default(), zero_env])
            .unwrap_err();
        assert_eq!(err.field(), Some("env_factor"));

        let parent = AllocationParent {
            allocation_method_id: 4,
            goal_measure_id: 2,
            goals: Goals {
                hazard_rate_goal: 0.000617,
                ..Default::default()
            },
            mission_time: 100.0,
            hazard_rate: 0.0,
        };
        assert!(do_allocate(&parent, &[child.clone()]).is_err());

        // Ratings only matter to feasibility of objectives.
        let equal = AllocationParent {
            allocation_method_id: 1,
            goal_measure_id: 1,
            goals: Goals {
                reliability_goal: 0.99,
                ..Default::default()
            },
            ..parent
        };
        let result = do_allocate(&equal, &[child]).unwrap();
        assert_eq!(result.cumulative_weight, 0);
    }

    #[test]
    fn test_do_allocate_round_trip() {
        let parent = AllocationParent {
            allocation_method_id: 4,
            goal_measure_id: 2,
            goals: Goals {
                hazard_rate_goal: 0.000617,
                ..Default::default()
            },
            mission_time: 100.0,
            hazard_rate: 0.0,
        };
        let children = vec![AllocationChild::default(); 3];
        let result = do_allocate(&parent, &children).unwrap();
        assert_eq!(result.cumulative_weight, 3);
        for a in &result.children {
            assert!(approx(a.hazard_rate_alloc, 0.000617 / 3.0));
            assert!((a.reliability_alloc - (-a.hazard_rate_alloc * 100.0).exp()).abs() < 1e-15);
        }
    }

    #[test]
    fn test_unknown_method() {
        assert!(matches!(
            AllocationMethod::from_id(5),
            Err(AnalysisError::Lookup { .. })
        ));
        assert!(GoalMeasure::from_id(0).is_err());
    }
}
