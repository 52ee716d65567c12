//! First-run demo data.

use chrono::Utc;

use crate::customer::model::{
    ContactInfluence, Customer, CustomerContact, CustomerSize, CustomerStage,
};
use crate::user::model::{User, UserRole};

/// The three default staff accounts.
pub fn default_users() -> Vec<User> {
    let now = Utc::now();
    let user = |id: &str, name: &str, email: &str, role, department: &str| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: None,
        role,
        department: department.to_string(),
        created_at: now,
    };

    vec![
        user("1", "张三", "zhangsan@company.com", UserRole::ProductManager, "产品部"),
        user("2", "李四", "lisi@company.com", UserRole::Sales, "销售部"),
        user("3", "王五", "wangwu@company.com", UserRole::Implementation, "实施部"),
    ]
}

/// The two default customers, each with one decision maker.
pub fn default_customers() -> Vec<Customer> {
    let now = Utc::now();
    let decision_maker = |id: &str, name: &str, title: &str, department: &str| CustomerContact {
        id: id.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        department: department.to_string(),
        phone: None,
        email: None,
        influence: ContactInfluence::DecisionMaker,
    };

    vec![
        Customer {
            id: "c1".to_string(),
            name: "蜜雪冰城".to_string(),
            industry: "餐饮零售".to_string(),
            size: CustomerSize::Large,
            stage: CustomerStage::Paid,
            contract_value: Some(500_000.0),
            contacts: vec![decision_maker("ct1", "王总", "数据总监", "数据部")],
            created_at: now,
        },
        Customer {
            id: "c2".to_string(),
            name: "雅戈尔".to_string(),
            industry: "服装零售".to_string(),
            size: CustomerSize::Large,
            stage: CustomerStage::Paid,
            contract_value: Some(300_000.0),
            contacts: vec![decision_maker("ct2", "刘总", "CIO", "IT部")],
            created_at: now,
        },
    ]
}
