//! Conversions between domain models and the shared DTO types.
//!
//! Presentation layers only ever see the `shared` crate's types; these
//! mappers are the one place domain models cross that boundary.

use shared::{
    AuthMethodDto, BookSaleLineDto, DailySummary, LanguageDto, MonthlySummary,
    SaveDailyReportRequest, SaveProfileRequest, ThemeDto, UpdateSettingsRequest, WeeklySummary,
};

use crate::domain::calendar;
use crate::domain::models::{
    AuthMethod, BookSaleLine, DailyReport, Language, MonthlyReport, Theme, WeeklyReport,
};
use crate::domain::profile_service::{SaveProfileCommand, UpdateSettingsCommand};
use crate::domain::report_service::SaveDailyReportCommand;

pub struct ReportMapper;

impl ReportMapper {
    pub fn to_daily_dto(report: &DailyReport) -> DailySummary {
        DailySummary {
            id: report.id.clone(),
            date: report.date,
            hours: report.hours,
            books_sold: report.books_sold,
            amount: report.amount,
            free_literature: report.free_literature,
            contacts: report.contacts,
            home_visits: report.home_visits,
            bible_studies: report.bible_studies,
            prayers_offered: report.prayers_offered,
            baptisms: report.baptisms,
            church_attendance: report.church_attendance,
            book_sales: report.book_sales.iter().map(line_to_dto).collect(),
        }
    }

    pub fn to_weekly_dto(report: &WeeklyReport) -> WeeklySummary {
        WeeklySummary {
            id: report.id.clone(),
            week_number: report.week_number,
            start_date: report.start_date,
            end_date: report.end_date,
            canvasser_name: report.canvasser_name.clone(),
            canvasser_phone: report.canvasser_phone.clone(),
            total_hours: report.totals.total_hours,
            total_books_sold: report.totals.total_books_sold,
            total_amount: report.totals.total_amount,
            total_free_literature: report.totals.total_free_literature,
            total_contacts: report.totals.total_contacts,
            total_home_visits: report.totals.total_home_visits,
            total_bible_studies: report.totals.total_bible_studies,
            total_prayers_offered: report.totals.total_prayers_offered,
            total_baptisms: report.totals.total_baptisms,
            total_church_attendance: report.totals.total_church_attendance,
            locked: report.locked,
            daily_reports: report.daily_reports.iter().map(Self::to_daily_dto).collect(),
        }
    }

    pub fn to_monthly_dto(report: &MonthlyReport) -> MonthlySummary {
        MonthlySummary {
            id: report.id.clone(),
            month: report.month,
            year: report.year,
            month_name: calendar::month_name(report.month).to_string(),
            canvasser_name: report.canvasser_name.clone(),
            canvasser_phone: report.canvasser_phone.clone(),
            total_hours: report.totals.total_hours,
            total_books_sold: report.totals.total_books_sold,
            total_amount: report.totals.total_amount,
            total_free_literature: report.totals.total_free_literature,
            total_contacts: report.totals.total_contacts,
            total_home_visits: report.totals.total_home_visits,
            total_bible_studies: report.totals.total_bible_studies,
            total_prayers_offered: report.totals.total_prayers_offered,
            total_baptisms: report.totals.total_baptisms,
            total_church_attendance: report.totals.total_church_attendance,
            weekly_reports: report.weekly_reports.iter().map(Self::to_weekly_dto).collect(),
        }
    }

    pub fn to_save_daily_command(request: SaveDailyReportRequest) -> SaveDailyReportCommand {
        SaveDailyReportCommand {
            date: request.date,
            hours: request.hours,
            books_sold: request.books_sold,
            amount: request.amount,
            free_literature: request.free_literature,
            contacts: request.contacts,
            home_visits: request.home_visits,
            bible_studies: request.bible_studies,
            prayers_offered: request.prayers_offered,
            baptisms: request.baptisms,
            church_attendance: request.church_attendance,
            book_sales: request.book_sales.into_iter().map(line_from_dto).collect(),
        }
    }

    pub fn to_save_profile_command(request: SaveProfileRequest) -> SaveProfileCommand {
        SaveProfileCommand {
            name: request.name,
            phone: request.phone,
            school: request.school,
        }
    }

    pub fn to_update_settings_command(request: UpdateSettingsRequest) -> UpdateSettingsCommand {
        UpdateSettingsCommand {
            biometric_enabled: request.biometric_enabled,
            auto_lock_weeks: request.auto_lock_weeks,
            reminder_notifications: request.reminder_notifications,
            auth_method: request.auth_method.map(AuthMethod::from),
            theme: request.theme.map(Theme::from),
            language: request.language.map(Language::from),
        }
    }
}

fn line_to_dto(line: &BookSaleLine) -> BookSaleLineDto {
    BookSaleLineDto {
        title: line.title.clone(),
        unit_price: line.unit_price,
        quantity: line.quantity,
    }
}

fn line_from_dto(line: BookSaleLineDto) -> BookSaleLine {
    BookSaleLine {
        title: line.title,
        unit_price: line.unit_price,
        quantity: line.quantity,
    }
}

impl From<AuthMethodDto> for AuthMethod {
    fn from(value: AuthMethodDto) -> Self {
        match value {
            AuthMethodDto::Password => AuthMethod::Password,
            AuthMethodDto::Pin => AuthMethod::Pin,
            AuthMethodDto::Pattern => AuthMethod::Pattern,
            AuthMethodDto::Biometric => AuthMethod::Biometric,
        }
    }
}

impl From<AuthMethod> for AuthMethodDto {
    fn from(value: AuthMethod) -> Self {
        match value {
            AuthMethod::Password => AuthMethodDto::Password,
            AuthMethod::Pin => AuthMethodDto::Pin,
            AuthMethod::Pattern => AuthMethodDto::Pattern,
            AuthMethod::Biometric => AuthMethodDto::Biometric,
        }
    }
}

impl From<ThemeDto> for Theme {
    fn from(value: ThemeDto) -> Self {
        match value {
            ThemeDto::Light => Theme::Light,
            ThemeDto::Dark => Theme::Dark,
        }
    }
}

impl From<Theme> for ThemeDto {
    fn from(value: Theme) -> Self {
        match value {
            Theme::Light => ThemeDto::Light,
            Theme::Dark => ThemeDto::Dark,
        }
    }
}

impl From<LanguageDto> for Language {
    fn from(value: LanguageDto) -> Self {
        match value {
            LanguageDto::Sw => Language::Sw,
            LanguageDto::En => Language::En,
        }
    }
}

impl From<Language> for LanguageDto {
    fn from(value: Language) -> Self {
        match value {
            Language::Sw => LanguageDto::Sw,
            Language::En => LanguageDto::En,
        }
    }
}
