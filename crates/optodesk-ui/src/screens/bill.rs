//! Bill entry and bill management pages.

use anyhow::Context;
use chrono::NaiveDate;

use optodesk_core::config::DropdownConfig;
use optodesk_core::history::{bill_history, BillFilter, BillHistoryRow};
use optodesk_core::models::{
    Bill, BillPatient, BirthAllergyField, BirthAllergyRow, GeneralField, GeneralRow, HealthField,
    HealthHistoryRow, MedicationRow, OcularField, OcularHistoryRow, Patient,
};
use optodesk_core::options::{condition_options, eye_options, OptionCatalog, OptionField};
use optodesk_core::{Database, Stored};

use super::{finish, FormError};
use crate::host::OverlayHost;
use crate::select::{HitTarget, OverlayView, SearchableSelect};
use crate::table::{RowTable, TableError, TableResult};
use crate::textarea::AutoResizeText;
use crate::toast::Toaster;

const PATIENT_PLACEHOLDER: &str = "Search & Select Patient (MR No / Name)";

/// Sections of the bill, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillSection {
    General,
    HealthHistory,
    OcularHistory,
    BirthAllergies,
    Medications,
}

/// A table cell that can host a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRef {
    General(usize, GeneralField),
    Health(usize, HealthField),
    Ocular(usize, OcularField),
}

impl CellRef {
    fn section(&self) -> BillSection {
        match self {
            CellRef::General(..) => BillSection::General,
            CellRef::Health(..) => BillSection::HealthHistory,
            CellRef::Ocular(..) => BillSection::OcularHistory,
        }
    }

    fn row(&self) -> usize {
        match self {
            CellRef::General(row, _) | CellRef::Health(row, _) | CellRef::Ocular(row, _) => *row,
        }
    }
}

#[derive(Debug)]
struct ActiveCell {
    cell: CellRef,
    select: SearchableSelect,
}

/// The "Add Medical Bill" page.
#[derive(Debug)]
pub struct BillForm {
    dropdown: DropdownConfig,
    patients: Vec<Stored<Patient>>,
    patient_labels: Vec<String>,
    catalog: OptionCatalog,
    conditions: Vec<String>,
    patient_picker: SearchableSelect,
    selected: Option<BillPatient>,
    general: RowTable<GeneralRow>,
    health_history: RowTable<HealthHistoryRow>,
    ocular_history: RowTable<OcularHistoryRow>,
    birth_allergies: RowTable<BirthAllergyRow>,
    medications: RowTable<MedicationRow>,
    active: Option<ActiveCell>,
}

impl BillForm {
    pub fn new(dropdown: &DropdownConfig) -> Self {
        Self {
            dropdown: dropdown.clone(),
            patients: Vec::new(),
            patient_labels: Vec::new(),
            catalog: OptionCatalog::default(),
            conditions: Vec::new(),
            patient_picker: Self::new_picker(dropdown),
            selected: None,
            general: RowTable::with_min_rows(1),
            health_history: RowTable::new(),
            ocular_history: RowTable::new(),
            birth_allergies: RowTable::new(),
            medications: RowTable::new(),
            active: None,
        }
    }

    fn new_picker(dropdown: &DropdownConfig) -> SearchableSelect {
        SearchableSelect::new(None)
            .with_config(dropdown)
            .with_placeholder(PATIENT_PLACEHOLDER)
    }

    /// Load patients and dropdown options.
    pub fn load(&mut self, db: &Database) -> anyhow::Result<()> {
        self.patients = db.list_patients().context("Failed to load patients")?;
        self.patient_labels = self.patients.iter().map(|p| p.data.picker_label()).collect();

        let records = db.list_data_records().context("Failed to load data")?;
        self.catalog = OptionCatalog::from_records(records.iter().map(|r| &r.data));

        let health = db
            .list_health_data()
            .context("Failed to load health condition data")?;
        self.conditions = condition_options(health.iter().map(|r| &r.data));

        tracing::debug!(
            event = "ui.bill_form.load_completed",
            patients = self.patients.len(),
            options = self.catalog.len(),
            conditions = self.conditions.len()
        );
        Ok(())
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    // =========================================================================
    // Patient picker
    // =========================================================================

    /// `"<MR> - <Name>"` labels, one per loaded patient.
    pub fn patient_options(&self) -> &[String] {
        &self.patient_labels
    }

    pub fn patient_picker(&self) -> &SearchableSelect {
        &self.patient_picker
    }

    pub fn patient_input(&mut self, host: &mut impl OverlayHost, text: &str) {
        self.patient_picker.input(host, text);
    }

    pub fn patient_focus(&mut self, host: &mut impl OverlayHost) {
        self.patient_picker.focus(host);
    }

    /// Forward a pointer-down to the picker; a committed row selects that
    /// patient.
    pub fn patient_pointer_down(
        &mut self,
        host: &mut impl OverlayHost,
        target: HitTarget,
    ) -> Option<&BillPatient> {
        // Labels can repeat, so resolve the clicked row by position
        let visible = self.patient_picker.match_indices(&self.patient_labels);
        self.patient_picker
            .pointer_down(host, target, &self.patient_labels)?;
        let HitTarget::OverlayRow(row) = target else {
            return None;
        };
        let patient = &self.patients[*visible.get(row)?];
        self.selected = Some(BillPatient::from_patient(&patient.id, &patient.data));
        self.selected.as_ref()
    }

    pub fn patient_overlay(&self) -> Option<OverlayView> {
        self.patient_picker.overlay(&self.patient_labels)
    }

    pub fn selected_patient(&self) -> Option<&BillPatient> {
        self.selected.as_ref()
    }

    // =========================================================================
    // Tables
    // =========================================================================

    pub fn general(&self) -> &RowTable<GeneralRow> {
        &self.general
    }

    pub fn health_history(&self) -> &RowTable<HealthHistoryRow> {
        &self.health_history
    }

    pub fn ocular_history(&self) -> &RowTable<OcularHistoryRow> {
        &self.ocular_history
    }

    pub fn birth_allergies(&self) -> &RowTable<BirthAllergyRow> {
        &self.birth_allergies
    }

    pub fn medications(&self) -> &RowTable<MedicationRow> {
        &self.medications
    }

    /// Append a blank row to a section, returning its index.
    pub fn add_row(&mut self, section: BillSection) -> usize {
        match section {
            BillSection::General => self.general.add_row(),
            BillSection::HealthHistory => self.health_history.add_row(),
            BillSection::OcularHistory => self.ocular_history.add_row(),
            BillSection::BirthAllergies => self.birth_allergies.add_row(),
            BillSection::Medications => self.medications.add_row(),
        }
    }

    /// Remove a row. An open cell dropdown in the same section is closed first.
    pub fn remove_row(
        &mut self,
        host: &mut impl OverlayHost,
        section: BillSection,
        index: usize,
    ) -> TableResult<()> {
        if self.active.as_ref().map(|a| a.cell.section()) == Some(section) {
            self.deactivate_cell(host);
        }
        match section {
            BillSection::General => self.general.remove_row(index).map(drop),
            BillSection::HealthHistory => self.health_history.remove_row(index).map(drop),
            BillSection::OcularHistory => self.ocular_history.remove_row(index).map(drop),
            BillSection::BirthAllergies => self.birth_allergies.remove_row(index).map(drop),
            BillSection::Medications => self.medications.remove_row(index).map(drop),
        }
    }

    /// Write a cell directly. An active dropdown on that cell follows the
    /// new value.
    pub fn set_cell(&mut self, cell: CellRef, value: String) -> TableResult<()> {
        let mirrored = (self.active_cell() == Some(cell)).then(|| value.clone());
        match cell {
            CellRef::General(row, field) => self.general.update_row(row, field, value),
            CellRef::Health(row, field) => self.health_history.update_row(row, field, value),
            CellRef::Ocular(row, field) => self.ocular_history.update_row(row, field, value),
        }?;
        if let (Some(value), Some(active)) = (mirrored, self.active.as_mut()) {
            active.select.sync_value(Some(&value));
        }
        Ok(())
    }

    pub fn cell_value(&self, cell: CellRef) -> Option<&str> {
        match cell {
            CellRef::General(row, field) => self.general.get(row).map(|r| r.get(field)),
            CellRef::Health(row, field) => self.health_history.get(row).map(|r| r.get(field)),
            CellRef::Ocular(row, field) => self.ocular_history.get(row).map(|r| r.get(field)),
        }
    }

    /// Visual rows a cell's textarea needs at `columns` characters wide.
    pub fn cell_rows(&self, cell: CellRef, columns: usize) -> usize {
        AutoResizeText::rows_for(self.cell_value(cell).unwrap_or_default(), columns)
    }

    pub fn set_birth_allergy(
        &mut self,
        row: usize,
        field: BirthAllergyField,
        value: String,
    ) -> TableResult<()> {
        self.birth_allergies.update_row(row, field, value)
    }

    pub fn set_medication(&mut self, row: usize, value: String) -> TableResult<()> {
        self.medications.update_row(row, (), value)
    }

    /// Dropdown options for a cell; empty for free-text columns.
    pub fn cell_options(&self, cell: CellRef) -> Vec<String> {
        match cell {
            CellRef::General(_, field) => OptionField::for_general(field)
                .map(|f| self.catalog.get(f).to_vec())
                .unwrap_or_default(),
            CellRef::Health(_, HealthField::Condition) => self.conditions.clone(),
            CellRef::Ocular(_, OcularField::Eye) => eye_options(self.general.rows()),
            CellRef::Health(..) | CellRef::Ocular(..) => Vec::new(),
        }
    }

    // =========================================================================
    // Cell dropdown (one active at a time)
    // =========================================================================

    /// Focus a dropdown cell, replacing any other active one.
    pub fn activate_cell(&mut self, host: &mut impl OverlayHost, cell: CellRef) -> TableResult<()> {
        let value = self.cell_value(cell).map(str::to_string).ok_or_else(|| {
            let len = match cell.section() {
                BillSection::General => self.general.len(),
                BillSection::HealthHistory => self.health_history.len(),
                _ => self.ocular_history.len(),
            };
            TableError::IndexOutOfRange {
                index: cell.row(),
                len,
            }
        })?;

        self.deactivate_cell(host);
        let mut select = SearchableSelect::new(Some(&value)).with_config(&self.dropdown);
        select.focus(host);
        self.active = Some(ActiveCell { cell, select });
        Ok(())
    }

    pub fn active_cell(&self) -> Option<CellRef> {
        self.active.as_ref().map(|a| a.cell)
    }

    pub fn cell_input(&mut self, host: &mut impl OverlayHost, text: &str) {
        if let Some(active) = self.active.as_mut() {
            active.select.input(host, text);
        }
    }

    /// Forward a pointer-down to the active cell; a commit writes the cell.
    pub fn cell_pointer_down(
        &mut self,
        host: &mut impl OverlayHost,
        target: HitTarget,
    ) -> TableResult<Option<String>> {
        let Some(cell) = self.active_cell() else {
            return Ok(None);
        };
        let options = self.cell_options(cell);
        let committed = match self.active.as_mut() {
            Some(active) => active.select.pointer_down(host, target, &options),
            None => None,
        };
        if let Some(value) = &committed {
            self.set_cell(cell, value.clone())?;
        }
        Ok(committed)
    }

    pub fn cell_overlay(&self) -> Option<OverlayView> {
        let active = self.active.as_ref()?;
        active.select.overlay(&self.cell_options(active.cell))
    }

    pub fn on_scroll(&mut self, host: &impl OverlayHost) {
        self.patient_picker.on_scroll(host);
        if let Some(active) = self.active.as_mut() {
            active.select.on_scroll(host);
        }
    }

    pub fn on_resize(&mut self, host: &impl OverlayHost) {
        self.patient_picker.on_resize(host);
        if let Some(active) = self.active.as_mut() {
            active.select.on_resize(host);
        }
    }

    pub fn deactivate_cell(&mut self, host: &mut impl OverlayHost) {
        if let Some(mut active) = self.active.take() {
            active.select.unmount(host);
        }
    }

    // =========================================================================
    // Save
    // =========================================================================

    pub fn build_bill(&self) -> Result<Bill, FormError> {
        let patient = self.selected.clone().ok_or(FormError::NoPatientSelected)?;
        let mut bill = Bill::new(patient);
        bill.items = self.general.rows().to_vec();
        bill.health_history = self.health_history.rows().to_vec();
        bill.ocular_history = self.ocular_history.rows().to_vec();
        bill.birth_allergies = self.birth_allergies.rows().to_vec();
        bill.medications = self.medications.rows().to_vec();
        Ok(bill)
    }

    /// Save the bill and clear the page. Returns the new bill id.
    pub fn save(
        &mut self,
        host: &mut impl OverlayHost,
        db: &Database,
        toaster: &mut Toaster,
    ) -> Option<String> {
        let result = self.try_save(db);
        let id = finish(toaster, result, Some("Bill Saved!"))?;
        self.reset(host);
        Some(id)
    }

    fn try_save(&self, db: &Database) -> anyhow::Result<String> {
        let bill = self.build_bill()?;
        db.add_bill(&bill).context("Failed to save bill")
    }

    /// Clear selection and tables; loaded options are kept.
    pub fn reset(&mut self, host: &mut impl OverlayHost) {
        self.deactivate_cell(host);
        self.patient_picker.unmount(host);
        self.patient_picker = Self::new_picker(&self.dropdown);
        self.selected = None;
        self.general.reset();
        self.health_history.reset();
        self.ocular_history.reset();
        self.birth_allergies.reset();
        self.medications.reset();
    }

    /// Release listeners before the page goes away.
    pub fn unmount(&mut self, host: &mut impl OverlayHost) {
        self.deactivate_cell(host);
        self.patient_picker.unmount(host);
    }
}

/// The "Manage Bills" page.
#[derive(Debug, Clone, Default)]
pub struct BillManager {
    bills: Vec<Stored<Bill>>,
    filter: BillFilter,
    viewing: Option<String>,
}

impl BillManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, db: &Database, toaster: &mut Toaster) -> bool {
        let result = db.list_bills().context("Failed to load bills");
        match finish(toaster, result, None) {
            Some(bills) => {
                self.bills = bills;
                true
            }
            None => false,
        }
    }

    pub fn filter(&self) -> &BillFilter {
        &self.filter
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.filter.text = text.to_string();
    }

    pub fn set_search_date(&mut self, date: Option<NaiveDate>) {
        self.filter.date = date;
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    /// Bills passing the current filter.
    pub fn visible(&self) -> Vec<&Stored<Bill>> {
        self.filter.apply(&self.bills)
    }

    /// History rows for the bills passing the current filter.
    pub fn history(&self) -> Vec<BillHistoryRow> {
        let visible: Vec<Stored<Bill>> = self.visible().into_iter().cloned().collect();
        bill_history(&visible)
    }

    pub fn view(&mut self, id: &str) -> Option<&Bill> {
        let bill = self.bills.iter().find(|b| b.id == id)?;
        self.viewing = Some(bill.id.clone());
        Some(&bill.data)
    }

    pub fn viewing(&self) -> Option<&Bill> {
        let id = self.viewing.as_deref()?;
        self.bills.iter().find(|b| b.id == id).map(|b| &b.data)
    }

    pub fn close_view(&mut self) {
        self.viewing = None;
    }

    pub fn delete(&mut self, db: &Database, toaster: &mut Toaster, id: &str) -> bool {
        let result = db.delete_bill(id).context("Failed to delete bill");
        if finish(toaster, result, None).is_none() {
            return false;
        }
        if self.viewing.as_deref() == Some(id) {
            self.viewing = None;
        }
        self.load(db, toaster)
    }
}
