use crate::{
    api::{admin, attendance, department, employee, payroll, position},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/admin")
                    // /admin/login stays public
                    .service(
                        web::resource("/login")
                            .wrap(login_limiter.clone())
                            .route(web::post().to(admin::login)),
                    )
                    .service(
                        web::scope("")
                            .wrap(from_fn(auth_middleware))
                            .wrap(protected_limiter.clone())
                            // /me must register before /{id}
                            .service(
                                web::resource("/me")
                                    .route(web::get().to(admin::get_me))
                                    .route(web::put().to(admin::update_me)),
                            )
                            // /admin
                            .service(
                                web::resource("")
                                    .route(web::get().to(admin::list))
                                    .route(web::post().to(admin::create)),
                            )
                            // /admin/{id}
                            .service(
                                web::resource("/{id}")
                                    .route(web::get().to(admin::get))
                                    .route(web::put().to(admin::update))
                                    .route(web::delete().to(admin::remove)),
                            ),
                    ),
            )
            // reads are public, writes check the token in the handler
            .service(
                web::scope("/department")
                    .service(
                        web::resource("")
                            .route(web::get().to(department::list))
                            .route(web::post().to(department::create)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(department::get))
                            .route(web::put().to(department::update))
                            .route(web::delete().to(department::remove)),
                    ),
            )
            .service(
                web::scope("/position")
                    .service(
                        web::resource("")
                            .route(web::get().to(position::list))
                            .route(web::post().to(position::create)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(position::get))
                            .route(web::put().to(position::update))
                            .route(web::delete().to(position::remove)),
                    ),
            )
            .service(
                web::scope("/employee")
                    .wrap(from_fn(auth_middleware))
                    .wrap(protected_limiter.clone())
                    // /employee
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create))
                            .route(web::get().to(employee::list)),
                    )
                    // /employee/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get))
                            .route(web::put().to(employee::update))
                            .route(web::delete().to(employee::remove)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    .wrap(from_fn(auth_middleware))
                    .wrap(protected_limiter.clone())
                    // /attendance/clock-in, /attendance/clock-out
                    .service(
                        web::resource("/clock-in").route(web::post().to(attendance::clock_in)),
                    )
                    .service(
                        web::resource("/clock-out").route(web::post().to(attendance::clock_out)),
                    )
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::create))
                            .route(web::get().to(attendance::list)),
                    )
                    // /attendance/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(attendance::get))
                            .route(web::put().to(attendance::update))
                            .route(web::delete().to(attendance::remove)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    .wrap(from_fn(auth_middleware))
                    .wrap(protected_limiter)
                    // /payroll
                    .service(
                        web::resource("")
                            .route(web::post().to(payroll::create))
                            .route(web::get().to(payroll::list)),
                    )
                    // /payroll/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(payroll::get))
                            .route(web::put().to(payroll::update))
                            .route(web::delete().to(payroll::remove)),
                    ),
            ),
    );
}
