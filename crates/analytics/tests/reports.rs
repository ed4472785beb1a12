//! Reports over the demo dataset

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use synergos_analytics::{distance_km, graph, locations, stats, AnalyticsConfig, TRANSACTED_WITH};
use synergos_core::{Dataset, GroupStatus};

#[test]
fn test_demo_overview() {
    let now = Utc.with_ymd_and_hms(2025, 11, 21, 0, 0, 0).unwrap();
    let report = stats(&Dataset::demo(), now, &AnalyticsConfig::default());

    assert_eq!(report.overview.total_users, 5);
    assert_eq!(report.overview.total_groups, 3);
    assert_eq!(report.overview.total_transactions, 4);
    assert_eq!(report.overview.total_volume, dec!(11000));
    assert_eq!(report.overview.avg_transaction_size, dec!(2750));
    assert_eq!(report.overview.total_group_balance, dec!(40500));
    assert_eq!(report.overview.avg_group_balance, dec!(13500));
    assert_eq!(report.overview.avg_transactions_per_user, dec!(0.8));

    assert_eq!(report.transaction_status.completed, 2);
    assert_eq!(report.transaction_status.pending, 1);
    assert_eq!(report.transaction_status.approved, 1);
    assert_eq!(report.transaction_status.rejected, 0);

    assert_eq!(report.trends.recent_transactions, 2);
    assert_eq!(report.trends.growth_rate, "50.00");
}

#[test]
fn test_trend_window_is_configurable() {
    let now = Utc.with_ymd_and_hms(2025, 11, 21, 0, 0, 0).unwrap();
    let config = AnalyticsConfig {
        trend_window_days: 30,
    };
    let report = stats(&Dataset::demo(), now, &config);

    assert_eq!(report.trends.window_days, 30);
    assert_eq!(report.trends.recent_transactions, 4);
    assert_eq!(report.trends.growth_rate, "100.00");
}

#[test]
fn test_activity_and_engagement() {
    let report = stats(&Dataset::demo(), Utc::now(), &AnalyticsConfig::default());

    let group3 = report
        .group_activity
        .iter()
        .find(|g| g.id == "group3")
        .unwrap();
    assert_eq!(group3.members, 4);
    assert_eq!(group3.transaction_count, 1);

    assert_eq!(report.user_engagement.len(), 4);
    for pair in report.user_engagement.windows(2) {
        assert!(pair[0].transaction_count >= pair[1].transaction_count);
    }

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["overview"]["totalVolume"], 11000.0);
    assert!(json["userEngagement"][0]["userId"].is_string());
}

#[test]
fn test_city_density() {
    let dataset = Dataset::demo();
    let report = locations(&dataset.users);

    assert_eq!(report.locations.len(), 5);
    assert_eq!(report.density.len(), 5);
    for city in &report.density {
        assert_eq!(city.count, 1);
        assert!((city.percentage - 20.0).abs() < 1e-9);
    }

    let total: f64 = report.density.iter().map(|c| c.percentage).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn test_users_are_within_the_country() {
    let dataset = Dataset::demo();
    let casablanca = dataset.users[0].location.clone().unwrap();
    for user in &dataset.users {
        let loc = user.location.as_ref().unwrap();
        assert!(distance_km(&casablanca, loc) < 400.0);
    }
}

#[test]
fn test_demo_graph() {
    let data = graph(&Dataset::demo());

    assert_eq!(data.nodes.len(), 5);
    assert_eq!(data.clusters.len(), 3);
    assert_eq!(data.relationships.len(), 10);
    assert!(data.relationships.iter().all(|r| r.kind == TRANSACTED_WITH));

    let primary = |id: &str| {
        data.nodes
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.group_id.clone())
    };
    assert_eq!(primary("user3").as_deref(), Some("group1"));
    assert_eq!(primary("user5").as_deref(), Some("group2"));
}

#[test]
fn test_pending_groups_are_not_linked() {
    let mut dataset = Dataset::demo();
    for group in &mut dataset.groups {
        group.status = GroupStatus::Pending;
    }

    let data = graph(&dataset);
    assert!(data.relationships.is_empty());
    assert_eq!(data.clusters.len(), 3);
}
