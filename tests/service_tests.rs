use chrono::NaiveDate;
use uuid::Uuid;
use zeni_core::config::Config;
use zeni_core::core::services::{
    BudgetService, BudgetUpsert, CategoryOrigin, CategoryService, InsightsService, ListFilter,
    NewRecurring, NewTransaction, RecurringService, TransactionPatch, TransactionService,
    UserService,
};
use zeni_core::errors::CoreError;
use zeni_core::ledger::{BalanceStatus, BudgetStatus, Frequency, TransactionKind};
use zeni_core::store::Store;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> (Store, Config, Uuid) {
    let mut store = Store::new();
    let user_id = UserService::register(&mut store, "Ana", "ana@example.com").unwrap();
    (store, Config::default(), user_id)
}

fn new_txn(description: &str, amount_cents: i64, kind: TransactionKind, d: NaiveDate) -> NewTransaction {
    NewTransaction {
        description: description.into(),
        amount_cents,
        kind,
        date: d,
        category_id: None,
    }
}

#[test]
fn test_create_transaction_auto_categorizes() {
    let (mut store, config, user_id) = setup();
    let id = TransactionService::create(
        &mut store,
        &config,
        user_id,
        new_txn("uber corrida aeroporto", 35_00, TransactionKind::Expense, date(2025, 1, 3)),
    )
    .unwrap();

    let txn = TransactionService::get(&store, user_id, id).unwrap();
    let category_id = txn.category_id.expect("suggester should assign a category");
    let category = store.category(category_id).unwrap();
    assert_eq!(category.name, "Transporte");
    assert!(category.auto_generated);

    // A second matching transaction reuses the category instead of creating
    // a duplicate.
    TransactionService::create(
        &mut store,
        &config,
        user_id,
        new_txn("uber centro", 18_00, TransactionKind::Expense, date(2025, 1, 4)),
    )
    .unwrap();
    assert_eq!(CategoryService::list(&store, user_id, Some(CategoryOrigin::Auto)).len(), 1);
}

#[test]
fn test_auto_categorization_respects_opt_outs() {
    let (mut store, mut config, user_id) = setup();

    config.auto_categorize_enabled = false;
    let id = TransactionService::create(
        &mut store,
        &config,
        user_id,
        new_txn("uber corrida", 20_00, TransactionKind::Expense, date(2025, 1, 3)),
    )
    .unwrap();
    assert!(TransactionService::get(&store, user_id, id).unwrap().category_id.is_none());

    config.auto_categorize_enabled = true;
    UserService::update_profile(&mut store, user_id, None, Some(false)).unwrap();
    let id = TransactionService::create(
        &mut store,
        &config,
        user_id,
        new_txn("posto shell", 90_00, TransactionKind::Expense, date(2025, 1, 5)),
    )
    .unwrap();
    assert!(TransactionService::get(&store, user_id, id).unwrap().category_id.is_none());
}

#[test]
fn test_update_recategorizes_only_uncategorized_records() {
    let (mut store, config, user_id) = setup();
    let id = TransactionService::create(
        &mut store,
        &config,
        user_id,
        new_txn("compra sem nome", 40_00, TransactionKind::Expense, date(2025, 2, 1)),
    )
    .unwrap();
    assert!(TransactionService::get(&store, user_id, id).unwrap().category_id.is_none());

    let patch = TransactionPatch {
        description: Some("assinatura netflix premium".into()),
        ..Default::default()
    };
    TransactionService::update(&mut store, &config, user_id, id, patch).unwrap();
    let txn = TransactionService::get(&store, user_id, id).unwrap();
    let category = store.category(txn.category_id.unwrap()).unwrap();
    assert_eq!(category.name, "Assinaturas");
}

#[test]
fn test_list_filters_and_pagination() {
    let (mut store, config, user_id) = setup();
    let category_id = CategoryService::create(&mut store, user_id, "Lazer").unwrap();
    for day in 1..=5 {
        TransactionService::create(
            &mut store,
            &config,
            user_id,
            NewTransaction {
                description: format!("gasto {day}"),
                amount_cents: 10_00 * day as i64,
                kind: TransactionKind::Expense,
                date: date(2025, 1, day),
                category_id: if day % 2 == 0 { Some(category_id) } else { None },
            },
        )
        .unwrap();
    }

    let all = TransactionService::list(&store, user_id, &ListFilter::default());
    assert_eq!(all.len(), 5);
    assert!(all[0].date > all[4].date, "newest first");

    let on_date = TransactionService::list(
        &store,
        user_id,
        &ListFilter {
            on_date: Some(date(2025, 1, 3)),
            ..Default::default()
        },
    );
    assert_eq!(on_date.len(), 1);

    let by_category = TransactionService::list(
        &store,
        user_id,
        &ListFilter {
            category_id: Some(category_id),
            ..Default::default()
        },
    );
    assert_eq!(by_category.len(), 2);

    let page = TransactionService::list(
        &store,
        user_id,
        &ListFilter {
            skip: 1,
            limit: Some(2),
            ..Default::default()
        },
    );
    assert_eq!(page.len(), 2);
}

#[test]
fn test_category_crud_rules() {
    let (mut store, config, user_id) = setup();
    let id = CategoryService::create(&mut store, user_id, "Viagens").unwrap();

    let duplicate = CategoryService::create(&mut store, user_id, "Viagens");
    assert!(matches!(duplicate, Err(CoreError::Validation(_))));

    CategoryService::rename(&mut store, user_id, id, "Ferias").unwrap();
    assert!(store.category_by_name(user_id, "Ferias").is_some());

    // A category referenced by a transaction cannot be deleted.
    TransactionService::create(
        &mut store,
        &config,
        user_id,
        NewTransaction {
            description: "passagem aerea".into(),
            amount_cents: 800_00,
            kind: TransactionKind::Expense,
            date: date(2025, 3, 10),
            category_id: Some(id),
        },
    )
    .unwrap();
    let delete = CategoryService::delete(&mut store, user_id, id);
    assert!(matches!(delete, Err(CoreError::Validation(_))));
}

#[test]
fn test_recurring_service_validation_and_materialization() {
    let (mut store, _config, user_id) = setup();

    let missing_weekday = RecurringService::create(
        &mut store,
        user_id,
        NewRecurring {
            description: "Feira".into(),
            amount_cents: 80_00,
            kind: TransactionKind::Expense,
            frequency: Frequency::Weekly,
            interval: 1,
            start_date: date(2025, 1, 6),
            end_date: None,
            weekday: None,
            day_of_month: None,
            category_id: None,
        },
    );
    assert!(matches!(missing_weekday, Err(CoreError::Validation(_))));

    let id = RecurringService::create(
        &mut store,
        user_id,
        NewRecurring {
            description: "Aluguel".into(),
            amount_cents: 1500_00,
            kind: TransactionKind::Expense,
            frequency: Frequency::Monthly,
            interval: 1,
            start_date: date(2025, 1, 31),
            end_date: None,
            weekday: None,
            day_of_month: Some(31),
            category_id: None,
        },
    )
    .unwrap();

    let created = RecurringService::materialize_up_to(&mut store, user_id, date(2025, 3, 31)).unwrap();
    assert_eq!(created, 3);
    let again = RecurringService::materialize_up_to(&mut store, user_id, date(2025, 3, 31)).unwrap();
    assert_eq!(again, 0, "repeat pass must not duplicate");

    // Deleting the definition keeps the generated transactions.
    RecurringService::delete(&mut store, user_id, id).unwrap();
    assert_eq!(store.transactions_for_user(user_id).count(), 3);
    assert!(RecurringService::list(&store, user_id).is_empty());
}

#[test]
fn test_budget_upsert_and_status() {
    let (mut store, config, user_id) = setup();
    let category_id = CategoryService::create(&mut store, user_id, "Mercado").unwrap();
    TransactionService::create(
        &mut store,
        &config,
        user_id,
        NewTransaction {
            description: "compras do mes".into(),
            amount_cents: 850_00,
            kind: TransactionKind::Expense,
            date: date(2025, 4, 12),
            category_id: Some(category_id),
        },
    )
    .unwrap();

    let report = BudgetService::upsert(
        &mut store,
        user_id,
        BudgetUpsert {
            category_id,
            year: 2025,
            month: 4,
            amount_cents: 1000_00,
            notify_threshold: None,
        },
    )
    .unwrap();
    assert_eq!(report.spent_cents, 850_00);
    assert_eq!(report.remaining_cents, 150_00);
    assert_eq!(report.status, BudgetStatus::Warning);

    // Upserting the same month updates in place.
    BudgetService::upsert(
        &mut store,
        user_id,
        BudgetUpsert {
            category_id,
            year: 2025,
            month: 4,
            amount_cents: 500_00,
            notify_threshold: None,
        },
    )
    .unwrap();
    let reports = BudgetService::list(&store, user_id, 2025, 4, false).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].status, BudgetStatus::Exceeded);

    let alerts = BudgetService::list(&store, user_id, 2025, 4, true).unwrap();
    assert_eq!(alerts.len(), 1);
}

#[test]
fn test_preferences_lifecycle() {
    let (mut store, _config, user_id) = setup();

    let early = UserService::update_preferences(&mut store, user_id, Some(0), None, None);
    assert!(matches!(early, Err(CoreError::Validation(_))));

    let unordered = UserService::init_preferences(&mut store, user_id, 100_00, 50_00, 10_00);
    assert!(matches!(unordered, Err(CoreError::Validation(_))));

    UserService::init_preferences(&mut store, user_id, 0, 50_00, 150_00).unwrap();
    let merged = UserService::update_preferences(&mut store, user_id, None, Some(80_00), None).unwrap();
    assert_eq!(merged.ok, Some(80_00));
    assert_eq!(merged.bad, Some(0));

    let breaking = UserService::update_preferences(&mut store, user_id, Some(200_00), None, None);
    assert!(matches!(breaking, Err(CoreError::Validation(_))));
}

#[test]
fn test_daily_balance_through_service() {
    let (mut store, config, user_id) = setup();
    UserService::init_preferences(&mut store, user_id, 0, 50_00, 150_00).unwrap();
    TransactionService::create(
        &mut store,
        &config,
        user_id,
        new_txn("deposito salario", 100_00, TransactionKind::Income, date(2025, 1, 5)),
    )
    .unwrap();

    let entries = TransactionService::daily_balance(&store, user_id, 2025, 1).unwrap();
    assert_eq!(entries.len(), 31);
    assert_eq!(entries[0].status, BalanceStatus::Red);
    assert_eq!(entries[4].status, BalanceStatus::Yellow);

    let invalid = TransactionService::daily_balance(&store, user_id, 2025, 13);
    assert!(matches!(invalid, Err(CoreError::Validation(_))));
}

#[test]
fn test_insights_summary_and_patterns() {
    let (mut store, config, user_id) = setup();
    let entries = [
        ("salario mensal", 5000_00, TransactionKind::Income),
        ("uber para o trabalho", 900_00, TransactionKind::Expense),
        ("uber volta", 900_00, TransactionKind::Expense),
        ("restaurante almoco", 200_00, TransactionKind::Expense),
        ("netflix", 55_00, TransactionKind::Expense),
    ];
    for (description, amount, kind) in entries {
        TransactionService::create(
            &mut store,
            &config,
            user_id,
            new_txn(description, amount, kind, date(2025, 5, 10)),
        )
        .unwrap();
    }

    let insights = InsightsService::generate(&store, user_id, 2025, 5).unwrap();
    let summary = &insights.summary;
    assert_eq!(summary.total_income_cents, 5000_00);
    assert_eq!(summary.total_expenses_cents, 2055_00);
    assert_eq!(summary.transaction_count, 5);
    assert_eq!(summary.expense_count, 4);

    // Transport dominates spending, so it heads the sorted patterns.
    assert_eq!(summary.patterns[0].name, "transporte");
    assert_eq!(summary.patterns[0].amount_cents, 1800_00);
    assert_eq!(summary.patterns[0].count, 2);

    assert!(!insights.insights.is_empty());
}

#[test]
fn test_insights_empty_month() {
    let (store, _config, user_id) = setup();
    let insights = InsightsService::generate(&store, user_id, 2025, 7).unwrap();
    assert!(insights.insights.is_empty());
    assert_eq!(insights.summary.transaction_count, 0);
    assert_eq!(insights.summary.balance_cents, 0);
}

#[test]
fn test_ownership_is_enforced_across_users() {
    let (mut store, config, user_a) = setup();
    let user_b = UserService::register(&mut store, "Bia", "bia@example.com").unwrap();

    let id = TransactionService::create(
        &mut store,
        &config,
        user_a,
        new_txn("compra qualquer", 10_00, TransactionKind::Expense, date(2025, 1, 1)),
    )
    .unwrap();

    let steal = TransactionService::get(&store, user_b, id);
    assert!(matches!(steal, Err(CoreError::TransactionNotFound(_))));
    let delete = TransactionService::delete(&mut store, user_b, id);
    assert!(matches!(delete, Err(CoreError::TransactionNotFound(_))));
}

#[test]
fn test_duplicate_email_rejected() {
    let (mut store, _config, _user) = setup();
    let duplicate = UserService::register(&mut store, "Outra", "ana@example.com");
    assert!(matches!(duplicate, Err(CoreError::Validation(_))));
}
