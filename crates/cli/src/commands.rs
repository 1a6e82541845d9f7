//! Command handlers and plain-text rendering.

use anyhow::Context;

use abal_core::{CalendarDate, EntryId};
use abal_infra::{KeyValueStore, ProgressStore};
use abal_progress::{
    ChartBucket, GoalDirection, GoalProgress, LedgerRow, SeriesSummary, TimeRange, Trend, Weight,
};

pub async fn log_weight<S: KeyValueStore>(
    session: &mut ProgressStore<S>,
    weight: &str,
    date: Option<CalendarDate>,
    json: bool,
) -> anyhow::Result<String> {
    let weight = Weight::parse(weight)?;
    let date = date.unwrap_or_else(CalendarDate::today);
    let outcome = session
        .add_entry(weight, date)
        .await
        .context("failed to save weight entry")?;

    if json {
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "entry": outcome.entry,
            "goal_reached": outcome.goal_reached,
        }))?);
    }

    let mut out = format!(
        "Logged {} on {} ({})",
        outcome.entry.weight, outcome.entry.date, outcome.entry.id
    );
    if outcome.goal_reached {
        out.push_str("\nGoal reached! You hit your target weight.");
    }
    Ok(out)
}

pub async fn delete_entry<S: KeyValueStore>(
    session: &mut ProgressStore<S>,
    id: &str,
) -> anyhow::Result<String> {
    let id: EntryId = id.parse()?;
    let removed = session
        .delete_entry(id)
        .await
        .context("failed to save weight history")?;
    Ok(if removed {
        format!("Deleted entry {id}")
    } else {
        format!("No entry with id {id}")
    })
}

pub async fn set_goal<S: KeyValueStore>(
    session: &mut ProgressStore<S>,
    weight: Option<&str>,
) -> anyhow::Result<String> {
    let goal = weight.map(Weight::parse).transpose()?;
    session
        .set_goal(goal)
        .await
        .context("failed to save goal weight")?;
    Ok(match goal {
        Some(goal) => format!("Goal weight set to {goal}"),
        None => "Goal weight cleared".to_string(),
    })
}

pub fn render_goal(progress: &GoalProgress, remaining: Option<f64>) -> String {
    match progress {
        GoalProgress::NoGoal => "No goal set (or no entries yet)".to_string(),
        GoalProgress::Tracking {
            percentage,
            is_achieved,
            direction,
        } => {
            let verb = match direction {
                GoalDirection::Losing => "losing",
                GoalDirection::Gaining => "gaining",
            };
            if *is_achieved {
                format!("Goal achieved ({verb}, {percentage:.0}%)")
            } else {
                let left = remaining.map(|r| format!(", {r:.1} to go")).unwrap_or_default();
                format!("{percentage:.0}% of the way ({verb}{left})")
            }
        }
    }
}

pub fn render_chart(range: TimeRange, series: &[ChartBucket]) -> String {
    if series.is_empty() {
        return format!("{}: not enough data for a chart", range.label());
    }

    let mut lines = vec![format!("{}:", range.label())];
    for bucket in series {
        lines.push(format!("  {:<8} {:>7.1}", bucket.label, bucket.value));
    }
    if let Some(summary) = SeriesSummary::from_series(series) {
        lines.push(format!("  change   {:>+7.1}", summary.change));
    }
    lines.join("\n")
}

pub fn render_ledger(rows: &[LedgerRow]) -> String {
    if rows.is_empty() {
        return "No entries yet".to_string();
    }

    rows.iter()
        .map(|row| {
            let change = match (row.change_from_previous, row.trend()) {
                (None, _) | (_, Trend::Baseline) => "—".to_string(),
                (Some(_), Trend::Flat) => "0.0".to_string(),
                (Some(c), _) => format!("{c:+.1}"),
            };
            format!(
                "{}  {:>7.1}  {:>6}  {}",
                row.entry.date,
                row.entry.weight.value(),
                change,
                row.entry.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use abal_infra::InMemoryKeyValueStore;
    use abal_progress::WeightHistory;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn goal_text_distinguishes_no_goal_from_zero() {
        assert_eq!(
            render_goal(&GoalProgress::NoGoal, None),
            "No goal set (or no entries yet)"
        );
        let zero = GoalProgress::Tracking {
            percentage: 0.0,
            is_achieved: false,
            direction: GoalDirection::Losing,
        };
        assert_eq!(render_goal(&zero, Some(10.0)), "0% of the way (losing, 10.0 to go)");
    }

    #[test]
    fn chart_text_handles_insufficient_data() {
        assert_eq!(
            render_chart(TimeRange::SevenDays, &[]),
            "7 Days: not enough data for a chart"
        );
        let series = vec![
            ChartBucket { label: "Week 2".into(), value: 160.0 },
            ChartBucket { label: "Week 3".into(), value: 157.5 },
        ];
        let text = render_chart(TimeRange::ThirtyDays, &series);
        assert!(text.starts_with("30 Days:"));
        let last: Vec<&str> = text.lines().last().unwrap().split_whitespace().collect();
        assert_eq!(last, ["change", "-2.5"]);
    }

    #[test]
    fn ledger_text_marks_baseline_and_signs() {
        let history = WeightHistory::new()
            .add_entry_with_id(EntryId::new(), Weight::new(150.0).unwrap(), date("2026-10-01"))
            .add_entry_with_id(EntryId::new(), Weight::new(148.0).unwrap(), date("2026-10-02"));
        let text = render_ledger(&history.delta_ledger());
        let rows: Vec<Vec<&str>> = text.lines().map(|l| l.split_whitespace().collect()).collect();
        assert_eq!(rows[0][..3], ["2026-10-02", "148.0", "-2.0"]);
        assert_eq!(rows[1][..3], ["2026-10-01", "150.0", "—"]);
    }

    #[tokio::test]
    async fn log_and_delete_round_trip() {
        let mut session = ProgressStore::load(InMemoryKeyValueStore::new()).await.unwrap();
        set_goal(&mut session, Some("90")).await.unwrap();
        log_weight(&mut session, "100", Some(date("2026-10-01")), false).await.unwrap();
        let text = log_weight(&mut session, "90", Some(date("2026-10-02")), false)
            .await
            .unwrap();
        assert!(text.contains("Goal reached!"));

        assert!(log_weight(&mut session, "-1", None, false).await.is_err());

        let id = session.history().entries()[0].id.to_string();
        assert_eq!(delete_entry(&mut session, &id).await.unwrap(), format!("Deleted entry {id}"));
        assert!(delete_entry(&mut session, &id).await.unwrap().starts_with("No entry"));
        assert!(delete_entry(&mut session, "garbage").await.is_err());
    }
}
