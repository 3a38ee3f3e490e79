use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::commission::{CommissionEntry, NewCommissionEntry};
use crate::domain::payment::{NewPayment, Payment, PaymentProvider, PaymentStatus};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CommissionReader, CommissionWriter, DieselRepository, PaymentListQuery, PaymentReader,
    PaymentWriter,
};

impl PaymentReader for DieselRepository {
    fn get_payment_by_id(
        &self,
        payment_id: i32,
        establishment_id: i32,
    ) -> RepositoryResult<Option<Payment>> {
        use crate::models::payment::Payment as DbPayment;
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let payment = payments::table
            .find(payment_id)
            .filter(payments::establishment_id.eq(establishment_id))
            .first::<DbPayment>(&mut conn)
            .optional()?;

        Ok(payment.map(Into::into))
    }

    fn get_payment_by_provider_ref(
        &self,
        provider: PaymentProvider,
        provider_ref: &str,
    ) -> RepositoryResult<Option<Payment>> {
        use crate::models::payment::Payment as DbPayment;
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let payment = payments::table
            .filter(payments::provider.eq(provider.to_string()))
            .filter(payments::provider_ref.eq(provider_ref))
            .first::<DbPayment>(&mut conn)
            .optional()?;

        Ok(payment.map(Into::into))
    }

    fn list_payments(&self, query: PaymentListQuery) -> RepositoryResult<(usize, Vec<Payment>)> {
        use crate::models::payment::Payment as DbPayment;
        use crate::schema::payments;

        let mut conn = self.conn()?;

        let build = || {
            let mut q = payments::table
                .filter(payments::establishment_id.eq(query.establishment_id))
                .into_boxed();

            if let Some(status) = query.status {
                q = q.filter(payments::status.eq(status.to_string()));
            }
            if let Some(from) = query.from {
                q = q.filter(payments::created_at.ge(from));
            }
            if let Some(to) = query.to {
                q = q.filter(payments::created_at.lt(to));
            }

            q
        };

        let total: i64 = build().count().get_result(&mut conn)?;

        let mut q = build().order(payments::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            q = q.limit(per_page).offset((page - 1) * per_page);
        }

        let items = q
            .load::<DbPayment>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Payment>>();

        Ok((total as usize, items))
    }
}

impl PaymentWriter for DieselRepository {
    fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment> {
        use crate::models::payment::{NewPayment as DbNewPayment, Payment as DbPayment};
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let insertable: DbNewPayment = new_payment.into();
        let created = diesel::insert_into(payments::table)
            .values(&insertable)
            .get_result::<DbPayment>(&mut conn)?;

        Ok(created.into())
    }

    fn set_payment_status(
        &self,
        payment_id: i32,
        status: PaymentStatus,
        paid_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Payment> {
        use crate::models::payment::Payment as DbPayment;
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let updated = diesel::update(payments::table.find(payment_id))
            .set((
                payments::status.eq(status.to_string()),
                payments::paid_at.eq(paid_at),
                payments::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbPayment>(&mut conn)?;

        Ok(updated.into())
    }
}

impl CommissionReader for DieselRepository {
    fn find_commission_for_payment(
        &self,
        payment_id: i32,
    ) -> RepositoryResult<Option<CommissionEntry>> {
        use crate::models::commission::CommissionEntry as DbCommissionEntry;
        use crate::schema::commission_entries;

        let mut conn = self.conn()?;
        let entry = commission_entries::table
            .filter(commission_entries::payment_id.eq(payment_id))
            .filter(commission_entries::amount_cents.gt(0))
            .first::<DbCommissionEntry>(&mut conn)
            .optional()?;

        Ok(entry.map(Into::into))
    }

    fn list_commission_entries(
        &self,
        professional_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> RepositoryResult<Vec<CommissionEntry>> {
        use crate::models::commission::CommissionEntry as DbCommissionEntry;
        use crate::schema::commission_entries;

        let mut conn = self.conn()?;
        let items = commission_entries::table
            .filter(commission_entries::professional_id.eq(professional_id))
            .filter(commission_entries::created_at.ge(from))
            .filter(commission_entries::created_at.lt(to))
            .order(commission_entries::created_at.asc())
            .load::<DbCommissionEntry>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl CommissionWriter for DieselRepository {
    fn create_commission_entry(
        &self,
        entry: &NewCommissionEntry,
    ) -> RepositoryResult<CommissionEntry> {
        use crate::models::commission::{
            CommissionEntry as DbCommissionEntry, NewCommissionEntry as DbNewCommissionEntry,
        };
        use crate::schema::commission_entries;

        let mut conn = self.conn()?;
        let insertable: DbNewCommissionEntry = entry.into();
        let created = diesel::insert_into(commission_entries::table)
            .values(&insertable)
            .get_result::<DbCommissionEntry>(&mut conn)?;

        Ok(created.into())
    }
}
