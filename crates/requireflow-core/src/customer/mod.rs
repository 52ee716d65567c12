//! Customer store.
//!
//! Customers can be created and read. There is no update or delete, and
//! requirements keep their own snapshot of the customer's name and industry.

pub mod model;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::workspace::Workspace;
use model::{Customer, CustomerContact, NewCustomer};

/// List all customers in stored order.
pub async fn list_customers(ws: &Workspace) -> CoreResult<Vec<Customer>> {
    let customers = ws.customers.load().await?;
    debug!(count = customers.len(), "Listed customers");
    Ok(customers)
}

/// Get a customer by ID.
pub async fn get_customer(ws: &Workspace, id: &str) -> CoreResult<Customer> {
    find_customer(ws, id)
        .await?
        .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))
}

/// Look up a customer, tolerating absence.
pub async fn find_customer(ws: &Workspace, id: &str) -> CoreResult<Option<Customer>> {
    Ok(ws.customers.load().await?.into_iter().find(|c| c.id == id))
}

/// Create a new customer.
pub async fn create_customer(ws: &Workspace, input: NewCustomer) -> CoreResult<Customer> {
    input.validate()?;

    let contacts = input
        .contacts
        .unwrap_or_default()
        .into_iter()
        .map(|c| CustomerContact {
            id: c.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: c.name,
            title: c.title,
            department: c.department,
            phone: c.phone,
            email: c.email,
            influence: c.influence,
        })
        .collect();

    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        industry: input.industry,
        size: input.size,
        stage: input.stage,
        contract_value: input.contract_value,
        contacts,
        created_at: Utc::now(),
    };

    let created = customer.clone();
    ws.customers
        .modify(move |customers| {
            customers.push(customer);
            Ok::<_, CoreError>(())
        })
        .await?;

    info!(id = %created.id, name = %created.name, "Created customer");
    Ok(created)
}
