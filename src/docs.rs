use crate::api::admin::{AdminPayload, AdminResponse, LoginData, LoginPayload, UpdateMePayload};
use crate::api::attendance::{AttendancePayload, AttendanceRow, ClockRequest};
use crate::api::department::DepartmentPayload;
use crate::api::employee::{EmployeeDetail, EmployeePayload, EmployeeSummary};
use crate::api::payroll::{PayrollPayload, PayrollRow};
use crate::api::position::PositionPayload;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::department::Department;
use crate::model::employee::EmployeeStatus;
use crate::model::position::Position;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SIMKAR API",
        version = "1.0.0",
        description = r#"
## Sistem Informasi Manajemen Karyawan

REST backend for employee administration in an Indonesian workplace.

### Key Features
- **Attendance** — daily clock-in / clock-out with one record per employee per day
- **Employees** — profiles linked to a department and a position
- **Payroll** — base salary, allowance and deduction per employee
- **Admin accounts** — bearer-token login; account management is superadmin only

### Security
Protected endpoints require **JWT Bearer authentication** obtained from `/api/admin/login`.

### Response Format
Every response carries the same envelope: `ok`, `message`, `data`.
"#,
    ),
    paths(
        crate::api::admin::login,
        crate::api::admin::create,
        crate::api::admin::list,
        crate::api::admin::get_me,
        crate::api::admin::update_me,
        crate::api::admin::get,
        crate::api::admin::update,
        crate::api::admin::remove,

        crate::api::attendance::clock_in,
        crate::api::attendance::clock_out,
        crate::api::attendance::create,
        crate::api::attendance::list,
        crate::api::attendance::get,
        crate::api::attendance::update,
        crate::api::attendance::remove,

        crate::api::employee::create,
        crate::api::employee::list,
        crate::api::employee::get,
        crate::api::employee::update,
        crate::api::employee::remove,

        crate::api::department::create,
        crate::api::department::list,
        crate::api::department::get,
        crate::api::department::update,
        crate::api::department::remove,

        crate::api::position::create,
        crate::api::position::list,
        crate::api::position::get,
        crate::api::position::update,
        crate::api::position::remove,

        crate::api::payroll::create,
        crate::api::payroll::list,
        crate::api::payroll::get,
        crate::api::payroll::update,
        crate::api::payroll::remove,
    ),
    components(
        schemas(
            LoginPayload,
            LoginData,
            AdminPayload,
            UpdateMePayload,
            AdminResponse,
            ClockRequest,
            AttendancePayload,
            AttendanceRow,
            AttendanceRecord,
            AttendanceStatus,
            EmployeePayload,
            EmployeeSummary,
            EmployeeDetail,
            EmployeeStatus,
            DepartmentPayload,
            Department,
            PositionPayload,
            Position,
            PayrollPayload,
            PayrollRow,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Admin", description = "Admin account and login APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Department", description = "Department management APIs"),
        (name = "Position", description = "Position management APIs"),
        (name = "Payroll", description = "Payroll management APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
