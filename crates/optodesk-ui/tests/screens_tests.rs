//! Page controllers working together over one store.

use chrono::NaiveDate;
use optodesk_core::config::AppConfig;
use optodesk_core::models::{Gender, GeneralField};
use optodesk_core::options::OptionField;
use optodesk_core::{DashboardStats, Database};
use optodesk_ui::geometry::Rect;
use optodesk_ui::host::HeadlessHost;
use optodesk_ui::screens::{BillForm, BillManager, CellRef, DataForm, PatientForm};
use optodesk_ui::select::HitTarget;
use optodesk_ui::toast::{ToastKind, Toaster};

#[test]
fn test_register_configure_and_bill() {
    let config = AppConfig::from_toml_str("[dropdown]\nno_results_label = \"Nothing found\"\n")
        .unwrap();
    let db = Database::open_in_memory().unwrap();
    let mut toaster = Toaster::from_config(&config.toast);
    let mut host = HeadlessHost::new(Rect::new(20.0, 40.0, 240.0, 28.0));
    let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

    let mut patient = PatientForm::new();
    patient.mr_no = "MR777".into();
    patient.name = "Meera Das".into();
    patient.phone = "9000012345".into();
    patient.set_dob("2000-07-02", today);
    patient.gender = Some(Gender::Female);
    patient.address = "Hill View".into();
    patient.submit(&db, &mut toaster).unwrap();

    let mut data = DataForm::new();
    data.set_value(OptionField::ChiefComplaint, "Myopia");
    data.save(&db, &mut toaster).unwrap();
    data.set_value(OptionField::ChiefComplaint, "Hyperopia");
    data.save(&db, &mut toaster).unwrap();

    let mut form = BillForm::new(&config.dropdown);
    form.load(&db).unwrap();

    form.patient_input(&mut host, "meera");
    form.patient_pointer_down(&mut host, HitTarget::OverlayRow(0))
        .unwrap();

    let cc = CellRef::General(0, GeneralField::ChiefComplaint);
    form.activate_cell(&mut host, cc).unwrap();
    form.cell_input(&mut host, "zz");
    assert!(form.cell_overlay().unwrap().is_no_results());
    form.cell_input(&mut host, "hyper");
    form.cell_pointer_down(&mut host, HitTarget::OverlayRow(0))
        .unwrap();
    assert_eq!(form.cell_value(cc), Some("Hyperopia"));

    form.save(&mut host, &db, &mut toaster).unwrap();
    let last = toaster.latest().unwrap();
    assert_eq!(last.kind, ToastKind::Success);
    assert_eq!(last.message, "Bill Saved!");
    form.unmount(&mut host);
    assert_eq!(host.total_listeners(), 0);

    let mut manager = BillManager::new();
    manager.load(&db, &mut toaster);
    manager.set_search_text("MR777");
    let rows = manager.history();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].first_complaint.as_deref(), Some("Hyperopia"));

    let bill = db.list_bills().unwrap().remove(0).data;
    assert_eq!(bill.patient.age, Some(23));

    let stats = DashboardStats::load(&db, bill.created_on().unwrap()).unwrap();
    assert_eq!(stats.patients, 1);
    assert_eq!(stats.data_records, 2);
    assert_eq!(stats.bills_today, 1);
}
