#![allow(dead_code)]

extern crate std;

use crate::types::{Allowance, Project, ProjectStatus};

/// INV-1: an allowance's filled amount never exceeds its ceiling.
pub fn assert_fill_within_ceiling(allowance: &Allowance) {
    assert!(
        allowance.amount_filled <= allowance.max_amount,
        "INV-1 violated: allowance {} filled {} past ceiling {}",
        allowance.id,
        allowance.amount_filled,
        allowance.max_amount
    );
    assert!(
        allowance.amount_filled >= 0,
        "INV-1 violated: allowance {} has negative fill ({})",
        allowance.id,
        allowance.amount_filled
    );
}

/// INV-2: a project's raised total never exceeds its funding target.
pub fn assert_raised_within_target(project: &Project) {
    assert!(
        project.raised_total <= project.funding_target,
        "INV-2 violated: project {} raised {} past target {}",
        project.id,
        project.raised_total,
        project.funding_target
    );
}

/// INV-3: conservation — the project's raised total equals the sum of the
/// filled amounts over all of its allowances.
pub fn assert_conservation(project: &Project, allowances: &[Allowance]) {
    let filled_sum: i128 = allowances
        .iter()
        .filter(|a| a.project_id == project.id)
        .map(|a| a.amount_filled)
        .sum();
    assert_eq!(
        project.raised_total, filled_sum,
        "INV-3 violated: project {} raised {} but allowances sum to {}",
        project.id, project.raised_total, filled_sum
    );
}

/// INV-4: status transition validity. Only forward transitions are allowed:
///   Active -> Filled | EndedPrematurely | Cancelled
///   Filled           -> (none)
///   EndedPrematurely -> (none)
///   Cancelled        -> (none)
pub fn assert_valid_status_transition(from: &ProjectStatus, to: &ProjectStatus) {
    let valid = matches!(
        (from, to),
        (ProjectStatus::Active, ProjectStatus::Filled)
            | (ProjectStatus::Active, ProjectStatus::EndedPrematurely)
            | (ProjectStatus::Active, ProjectStatus::Cancelled)
    );

    assert!(
        valid,
        "INV-4 violated: invalid status transition from {:?} to {:?}",
        from, to
    );
}

/// INV-5: rescaling preserves the pool/target ratio up to floor rounding —
/// the new pool is exactly `old_pool * new_target / old_target` and the
/// forfeited remainder is strictly less than one target's worth of pool.
pub fn assert_pool_ratio_preserved(
    old_pool: i128,
    old_target: i128,
    new_pool: i128,
    new_target: i128,
) {
    assert_eq!(
        new_pool,
        old_pool * new_target / old_target,
        "INV-5 violated: pool rescaled {}→{} but target rescaled {}→{}",
        old_pool,
        new_pool,
        old_target,
        new_target
    );
    // Floor rounding forfeits less than one unit per target-unit of scale.
    assert!(
        new_pool * old_target <= old_pool * new_target
            && old_pool * new_target - new_pool * old_target < old_target,
        "INV-5 violated: rounding drift exceeds one unit"
    );
}

/// INV-6: the payout shares of a set of allowances never sum past the pool.
pub fn assert_shares_within_pool(pool: i128, target: i128, allowances: &[Allowance]) {
    if target == 0 {
        return;
    }
    let share_sum: i128 = allowances
        .iter()
        .map(|a| pool * a.amount_filled / target)
        .sum();
    assert!(
        share_sum <= pool,
        "INV-6 violated: shares sum to {} but pool is {}",
        share_sum,
        pool
    );
}

/// Run all stateless per-project invariants.
pub fn assert_all_project_invariants(project: &Project, allowances: &[Allowance]) {
    assert_raised_within_target(project);
    assert_conservation(project, allowances);
    for allowance in allowances {
        assert_fill_within_ceiling(allowance);
    }
}
