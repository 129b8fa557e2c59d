use super::record::SubjectRecord;

/// Placeholder rendered for an empty score slot.
pub const MISSING_SCORE: &str = "-";

/// Whether a slot counts towards an average.
///
/// Zero counts as "not entered yet", so a genuine zero score is ignored too.
pub fn is_kept(score: Option<f64>) -> bool {
    matches!(score, Some(value) if value > 0.0)
}

/// Scores of one record that count towards averages, in period order.
pub fn kept_scores(record: &SubjectRecord) -> impl Iterator<Item = f64> + '_ {
    record.scores.iter().copied().filter(|s| is_kept(*s)).flatten()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Mean of a subject's kept scores, `0` when none are kept.
pub fn subject_average(record: &SubjectRecord) -> f64 {
    mean(kept_scores(record))
}

/// Mean of every kept score across all records.
///
/// Scores are pooled before averaging, so subjects with more recorded
/// periods weigh more than in a mean of subject averages.
pub fn overall_average(records: &[SubjectRecord]) -> f64 {
    mean(records.iter().flat_map(kept_scores))
}

/// Average with exactly two decimals, exact halves rounded away from zero.
pub fn format_average(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

/// Slot value as stored, or the placeholder dash.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => value.to_string(),
        None => MISSING_SCORE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(scores: [Option<f64>; 5]) -> SubjectRecord {
        SubjectRecord::new("id", "Subject", scores)
    }

    #[test]
    fn test_all_absent_average_is_zero() {
        assert_eq!(subject_average(&record([None; 5])), 0.0);
    }

    #[test]
    fn test_zero_and_negative_are_dropped() {
        let r = record([Some(80.0), Some(0.0), None, Some(90.0), Some(-5.0)]);
        let kept: Vec<f64> = kept_scores(&r).collect();
        assert_eq!(kept, vec![80.0, 90.0]);
        assert_eq!(subject_average(&r), 85.0);
        assert_eq!(format_average(subject_average(&r)), "85.00");
    }

    #[test]
    fn test_overall_average_empty() {
        assert_eq!(overall_average(&[]), 0.0);
    }

    #[test]
    fn test_overall_average_pools_scores() {
        let records = vec![
            record([Some(80.0), Some(90.0), None, None, None]),
            record([Some(70.0), None, None, None, None]),
        ];
        assert_eq!(overall_average(&records), 80.0);
        assert_ne!(overall_average(&records), (85.0 + 70.0) / 2.0);
    }

    #[test]
    fn test_overall_average_ignores_records_without_scores() {
        let records = vec![record([None; 5]), record([Some(60.0), None, None, None, None])];
        assert_eq!(overall_average(&records), 60.0);
    }

    #[test]
    fn test_format_average_two_decimals() {
        assert_eq!(format_average(85.0), "85.00");
        assert_eq!(format_average(0.0), "0.00");
        assert_eq!(format_average(77.5), "77.50");
        assert_eq!(format_average(200.0 / 3.0), "66.67");
    }

    #[test]
    fn test_format_average_rounds_halves_up() {
        assert_eq!(format_average(80.125), "80.13");
        assert_eq!(format_average(0.125), "0.13");
        assert_eq!(format_average(87.375), "87.38");
    }

    #[test]
    fn test_pooled_average_on_half_cent() {
        // 641 / 8 = 80.125
        let records = vec![
            record([Some(80.0), Some(80.0), Some(80.0), Some(80.0), Some(80.0)]),
            record([Some(80.0), Some(80.0), Some(81.0), None, None]),
        ];
        assert_eq!(overall_average(&records), 80.125);
        assert_eq!(format_average(overall_average(&records)), "80.13");
    }

    #[test]
    fn test_format_score_as_stored() {
        assert_eq!(format_score(Some(80.0)), "80");
        assert_eq!(format_score(Some(85.5)), "85.5");
        assert_eq!(format_score(Some(0.0)), "0");
        assert_eq!(format_score(Some(-5.0)), "-5");
        assert_eq!(format_score(None), "-");
    }
}
