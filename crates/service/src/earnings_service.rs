use chrono::{Duration, Months, NaiveTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Statement,
};
use serde::Serialize;
use uuid::Uuid;

use models::job::{self, JobStatus};
use models::{provider, transaction};

use crate::errors::ServiceError;

/// The four independent sums shown on the earnings page. Each defaults to 0
/// when no rows match; an empty ledger is not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EarningsSummary {
    pub lifetime: f64,
    pub monthly: f64,
    pub weekly: f64,
    pub pending: f64,
}

/// One (calendar year, calendar month) bucket of the trailing breakdown.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct MonthlyEarnings {
    pub year: i32,
    pub month: i32,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct ProviderSummary {
    pub name: String,
    pub service_type: String,
    pub rating: f64,
    pub total_jobs: i32,
    pub pending_jobs: i32,
    pub completed_jobs: i32,
    pub total_earnings: f64,
    pub today_appointments: u64,
}

#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub provider: ProviderSummary,
    pub recent_jobs: Vec<job::Model>,
    pub recent_transactions: Vec<transaction::Model>,
    pub monthly_earnings: Vec<MonthlyEarnings>,
}

async fn sum_transactions(
    db: &DatabaseConnection,
    provider_id: Uuid,
    since: Option<chrono::DateTime<Utc>>,
) -> Result<f64, ServiceError> {
    let mut query = transaction::Entity::find()
        .select_only()
        .column_as(transaction::Column::Amount.sum(), "total")
        .filter(transaction::Column::ProviderId.eq(provider_id));
    if let Some(s) = since {
        query = query.filter(transaction::Column::Date.gte(s));
    }
    let total: Option<Option<f64>> = query
        .into_tuple()
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(total.flatten().unwrap_or(0.0))
}

async fn sum_pending_jobs(db: &DatabaseConnection, provider_id: Uuid) -> Result<f64, ServiceError> {
    let total: Option<Option<f64>> = job::Entity::find()
        .select_only()
        .column_as(job::Column::Amount.sum(), "total")
        .filter(job::Column::ProviderId.eq(provider_id))
        .filter(job::Column::Status.eq(JobStatus::Pending.as_str()))
        .into_tuple()
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(total.flatten().unwrap_or(0.0))
}

/// Lifetime / last-30-days / last-7-days ledger sums plus the amount still
/// sitting in pending jobs. Read-only; never touches provider counters.
pub async fn earnings_summary(db: &DatabaseConnection, provider_id: Uuid) -> Result<EarningsSummary, ServiceError> {
    let now = Utc::now();
    let lifetime = sum_transactions(db, provider_id, None).await?;
    let monthly = sum_transactions(db, provider_id, Some(now - Duration::days(30))).await?;
    let weekly = sum_transactions(db, provider_id, Some(now - Duration::days(7))).await?;
    let pending = sum_pending_jobs(db, provider_id).await?;
    Ok(EarningsSummary { lifetime, monthly, weekly, pending })
}

/// Ledger amounts grouped by calendar (year, month) over the trailing
/// window, ascending. Months without transactions are omitted, not
/// zero-filled.
pub async fn monthly_breakdown(
    db: &DatabaseConnection,
    provider_id: Uuid,
    months_back: u32,
) -> Result<Vec<MonthlyEarnings>, ServiceError> {
    let since = Utc::now()
        .checked_sub_months(Months::new(months_back))
        .ok_or_else(|| ServiceError::Validation("months_back out of range".into()))?;
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"SELECT CAST(EXTRACT(YEAR FROM "date") AS INT4) AS "year",
                  CAST(EXTRACT(MONTH FROM "date") AS INT4) AS "month",
                  SUM("amount") AS "total"
           FROM "transaction"
           WHERE "provider_id" = $1 AND "date" >= $2
           GROUP BY 1, 2
           ORDER BY 1, 2"#,
        [provider_id.into(), since.into()],
    );
    MonthlyEarnings::find_by_statement(stmt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Everything the provider dashboard renders in one call: profile counters,
/// today's appointment count, the five most recent jobs and ledger entries,
/// and the six-month breakdown.
pub async fn dashboard_snapshot(db: &DatabaseConnection, provider_id: Uuid) -> Result<DashboardSnapshot, ServiceError> {
    let p = provider::Entity::find_by_id(provider_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("provider"))?;

    let today_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let tomorrow_start = today_start + Duration::days(1);
    let today_appointments = job::Entity::find()
        .filter(job::Column::ProviderId.eq(provider_id))
        .filter(job::Column::Date.gte(today_start))
        .filter(job::Column::Date.lt(tomorrow_start))
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    let recent_jobs = job::Entity::find()
        .filter(job::Column::ProviderId.eq(provider_id))
        .order_by_desc(job::Column::Date)
        .limit(5)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    let recent_transactions = transaction::Entity::find()
        .filter(transaction::Column::ProviderId.eq(provider_id))
        .order_by_desc(transaction::Column::Date)
        .limit(5)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    let monthly_earnings = monthly_breakdown(db, provider_id, 6).await?;

    Ok(DashboardSnapshot {
        provider: ProviderSummary {
            name: p.name,
            service_type: p.service_type,
            rating: p.rating,
            total_jobs: p.total_jobs,
            pending_jobs: p.pending_jobs,
            completed_jobs: p.completed_jobs,
            total_earnings: p.total_earnings,
            today_appointments,
        },
        recent_jobs,
        recent_transactions,
        monthly_earnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::Duration;
    use models::provider::NewProvider;

    async fn seed_provider(db: &DatabaseConnection) -> anyhow::Result<provider::Model> {
        let p = provider::create(
            db,
            NewProvider {
                name: "Earnings Test".into(),
                email: format!("earn_{}@example.com", Uuid::new_v4()),
                phone: "555-0200".into(),
                password_hash: "x".into(),
                service_type: "plumbing".into(),
                experience: 3,
                experience_unit: "years".into(),
                license_image: None,
                profile_image: None,
            },
        )
        .await?;
        Ok(p)
    }

    #[tokio::test]
    async fn empty_ledger_sums_to_zero_everywhere() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let p = seed_provider(&db).await?;

        let summary = earnings_summary(&db, p.id).await?;
        assert_eq!(summary, EarningsSummary { lifetime: 0.0, monthly: 0.0, weekly: 0.0, pending: 0.0 });

        let breakdown = monthly_breakdown(&db, p.id, 6).await?;
        assert!(breakdown.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn windows_partition_the_ledger_by_date() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let p = seed_provider(&db).await?;
        let now = Utc::now();

        // inside the week, inside the month, and outside both
        transaction::create(&db, p.id, "Leak Fix", "A", 50.0, (now - Duration::days(2)).into()).await?;
        transaction::create(&db, p.id, "Drain Cleaning", "B", 70.0, (now - Duration::days(20)).into()).await?;
        transaction::create(&db, p.id, "Repipe", "C", 500.0, (now - Duration::days(90)).into()).await?;

        let summary = earnings_summary(&db, p.id).await?;
        assert!((summary.lifetime - 620.0).abs() < f64::EPSILON);
        assert!((summary.monthly - 120.0).abs() < f64::EPSILON);
        assert!((summary.weekly - 50.0).abs() < f64::EPSILON);
        assert!((summary.pending - 0.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[tokio::test]
    async fn pending_sum_reads_jobs_not_the_ledger() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let p = seed_provider(&db).await?;

        models::job::create(
            &db,
            models::job::NewJob {
                provider_id: p.id,
                customer_name: "P1".into(),
                service_type: "Faucet Install".into(),
                description: None,
                amount: Some(40.0),
                date: None,
                time: None,
            },
        )
        .await?;
        models::job::create(
            &db,
            models::job::NewJob {
                provider_id: p.id,
                customer_name: "P2".into(),
                service_type: "Faucet Install".into(),
                description: None,
                amount: Some(35.0),
                date: None,
                time: None,
            },
        )
        .await?;

        let summary = earnings_summary(&db, p.id).await?;
        assert!((summary.pending - 75.0).abs() < f64::EPSILON);
        assert!((summary.lifetime - 0.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[tokio::test]
    async fn breakdown_is_ascending_and_skips_empty_months() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let p = seed_provider(&db).await?;
        let now = Utc::now();

        transaction::create(&db, p.id, "Job A", "A", 100.0, (now - Duration::days(70)).into()).await?;
        transaction::create(&db, p.id, "Job B", "B", 150.0, (now - Duration::days(70)).into()).await?;
        transaction::create(&db, p.id, "Job C", "C", 30.0, now.into()).await?;

        let breakdown = monthly_breakdown(&db, p.id, 6).await?;
        assert!(!breakdown.is_empty());
        for pair in breakdown.windows(2) {
            assert!((pair[0].year, pair[0].month) < (pair[1].year, pair[1].month));
        }
        for bucket in &breakdown {
            assert!(bucket.total > 0.0, "no zero-filled months expected");
        }
        Ok(())
    }

    #[tokio::test]
    async fn dashboard_rolls_up_provider_jobs_and_ledger() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let p = seed_provider(&db).await?;
        let now = Utc::now();

        for i in 0..7 {
            models::job::create(
                &db,
                models::job::NewJob {
                    provider_id: p.id,
                    customer_name: format!("Customer {i}"),
                    service_type: "Circuit Repair".into(),
                    description: None,
                    amount: Some(10.0 * i as f64),
                    date: Some((now - Duration::days(i)).into()),
                    time: None,
                },
            )
            .await?;
        }
        transaction::create(&db, p.id, "Circuit Repair", "Customer 1", 120.0, now.into()).await?;

        let snap = dashboard_snapshot(&db, p.id).await?;
        assert_eq!(snap.recent_jobs.len(), 5);
        assert_eq!(snap.recent_transactions.len(), 1);
        assert_eq!(snap.provider.today_appointments, 1);
        // newest first
        for pair in snap.recent_jobs.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
        Ok(())
    }

    #[tokio::test]
    async fn dashboard_for_unknown_provider_is_not_found() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let res = dashboard_snapshot(&db, Uuid::new_v4()).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
