//! Causal graph node catalogue
//!
//! One entry per derived attribute: which fields it assigns, which fields
//! it consumes, and the evaluation hook that reads the parents off the
//! patient record, maps them onto a condition model's evidence vector and
//! stores the sampled result. The table is data; execution order is derived
//! by topological sort in `crate::graph`.

use crate::config::GenerationConfig;
use crate::epidemiology::{AgeBand, Gender};
use crate::error::Result;
use crate::graph::CausalNode;
use crate::models::{ConditionModel, Evaluation, ParentAssignment, comorbidity, functional, outcomes};
use crate::population::collaborators::{Collaborators, WalkingInputs};
use crate::population::patient::{FieldValue, Patient};
use crate::population::sampler::{ContinuousAttribute, SamplerRng};
use crate::population::scores;

/// Everything a node evaluation can reach
pub struct EvalScope<'a> {
    /// Age band the individual belongs to
    pub band: &'a AgeBand,
    /// Index of the band, for the continuous sampler
    pub band_index: usize,
    /// Gender of the individual
    pub gender: Gender,
    /// Run configuration
    pub config: &'a GenerationConfig,
    /// Collaborator services
    pub collaborators: &'a Collaborators,
    /// The record under construction
    pub patient: &'a mut Patient,
    /// The individual's RNG stream
    pub rng: &'a mut SamplerRng,
}

impl EvalScope<'_> {
    fn present(&self, field: &str) -> Result<bool> {
        self.patient.is_present(field)
    }

    fn current_smoker(&self) -> Result<bool> {
        Ok(self.patient.int("smoking")? == 0)
    }

    fn former_smoker(&self) -> Result<bool> {
        Ok(self.patient.int("smoking")? == 1)
    }

    fn diabetic(&self) -> Result<bool> {
        Ok(self.present("t1dm")? || self.present("t2dm")?)
    }

    fn male(&self) -> bool {
        self.gender == Gender::Male
    }

    fn sample(&mut self, model: &ConditionModel, evidence: &[bool]) -> Result<Evaluation> {
        let parents: ParentAssignment = evidence.iter().copied().collect();
        model.evaluate(&parents, self.rng)
    }

    /// Evaluate a model and store the sampled flag under `field`
    fn store_condition(
        &mut self,
        field: &'static str,
        model: &ConditionModel,
        evidence: &[bool],
    ) -> Result<()> {
        let eval = self.sample(model, evidence)?;
        self.patient.set_flag(field, eval.present);
        Ok(())
    }

    /// Evaluate an outcome model, storing probability and flag
    fn store_outcome(
        &mut self,
        risk_field: &'static str,
        present_field: &'static str,
        model: &ConditionModel,
        evidence: &[bool],
    ) -> Result<()> {
        let eval = self.sample(model, evidence)?;
        self.patient.set(risk_field, FieldValue::Float(eval.probability));
        self.patient.set_flag(present_field, eval.present);
        Ok(())
    }
}

fn eval_foot_problems(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::foot_problems(s.band, s.gender)?;
    let female = !s.male();
    s.store_condition("footProblems", &model, &[female])
}

fn eval_history_of_delirium(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::history_of_delirium(s.band, s.gender)?;
    let evidence = [s.present("dementia")?, s.present("visualImpairment")?];
    s.store_condition("historyOfDelirium", &model, &evidence)
}

fn eval_copd(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::copd(s.band, s.gender)?;
    // The raw three-level smoking status keeps past and current smoking
    // mutually exclusive in the evidence vector.
    let evidence = [s.former_smoker()?, s.current_smoker()?, s.present("asthma")?];
    s.store_condition("copd", &model, &evidence)
}

fn eval_ckd(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::chronic_kidney_disease(s.band, s.gender)?;
    let evidence = [
        s.diabetic()?,
        s.patient.float("bmi")? >= 30.0,
        s.present("hypertension")?,
    ];
    s.store_condition("ckd", &model, &evidence)
}

fn eval_anaemia(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::anaemia(s.band, s.gender)?;
    let evidence = [s.present("ckd")?];
    s.store_condition("anaemia", &model, &evidence)
}

fn eval_antipsychotics(s: &mut EvalScope<'_>) -> Result<()> {
    let dementia = s.present("dementia")? && s.rng.uniform() < 0.074;
    let schizophrenia = s.present("schizophrenia")? && s.rng.uniform() < 0.75;
    s.patient.set_flag("antipsychotics", u8::from(dementia || schizophrenia));
    Ok(())
}

fn eval_antihypertensives(s: &mut EvalScope<'_>) -> Result<()> {
    let treated = s.present("hypertension")? && s.rng.uniform() < 0.674;
    s.patient.set_flag("antihypertensives", u8::from(treated));
    Ok(())
}

fn eval_corticosteroids(s: &mut EvalScope<'_>) -> Result<()> {
    let copd = s.present("copd")? && s.rng.uniform() < 0.18;
    let ra = s.present("ra")? && s.rng.uniform() < 0.35;
    s.patient.set_flag("corticosteroids", u8::from(copd || ra));
    Ok(())
}

/// One cardiovascular event at most is allocated per individual, chosen
/// uniformly when the ten-year risk draw fires
fn eval_cardiovascular(s: &mut EvalScope<'_>) -> Result<()> {
    for field in ["tia", "stroke", "mi", "angina"] {
        s.patient.set_flag(field, 0);
    }

    let risk = s
        .collaborators
        .cardio
        .ten_year_risk_percent(s.patient, s.gender)?;
    if s.rng.uniform() < risk / 100.0 {
        let mut allocation = [1u8, 0, 0, 0];
        s.rng.shuffle(&mut allocation);
        for (field, value) in ["tia", "stroke", "mi", "angina"].iter().copied().zip(allocation) {
            s.patient.set_flag(field, value);
        }
    }
    Ok(())
}

fn eval_hemiplegia(s: &mut EvalScope<'_>) -> Result<()> {
    // Around three quarters of stroke survivors have hemiplegia
    let hemiplegia = s.present("stroke")? && s.rng.uniform() < 0.75;
    s.patient.set_flag("hemiplegia", u8::from(hemiplegia));
    Ok(())
}

fn eval_dizziness(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::dizziness(s.band, s.gender)?;
    let evidence = [!s.male(), s.present("osteoporosis")?];
    s.store_condition("dizziness", &model, &evidence)
}

fn eval_ulcers(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::ulcers(s.band, s.gender)?;
    let evidence = [s.present("urinaryIncontinence")?];
    s.store_condition("ulcers", &model, &evidence)
}

fn eval_orthostatic_hypotension(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::orthostatic_hypotension(s.band, s.gender)?;
    let evidence = [
        s.diabetic()?,
        s.present("hypertension")?,
        s.present("parkinsonsDisease")?,
        s.present("dementia")?,
    ];
    s.store_condition("orthostaticHypotension", &model, &evidence)
}

fn eval_faecal_incontinence(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::faecal_incontinence(s.band, s.gender)?;
    let evidence = [
        s.present("urinaryIncontinence")?,
        s.diabetic()?,
        s.present("hypertension")?,
    ];
    s.store_condition("faecalIncontinence", &model, &evidence)
}

fn eval_heart_failure(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::heart_failure(s.band, s.gender)?;
    let evidence = [
        s.male(),
        s.patient.float("bmi")? >= 30.0,
        s.present("hypertension")?,
        s.diabetic()?,
        s.current_smoker()?,
        s.present("mi")?,
        s.present("af")?,
    ];
    s.store_condition("heartFailure", &model, &evidence)
}

fn eval_breathlessness(s: &mut EvalScope<'_>) -> Result<()> {
    // Chronic severe breathlessness, mMRC grade 3 or above
    let breathless = if s.present("copd")? || s.present("heartFailure")? {
        s.rng.uniform() > 0.5
    } else {
        s.rng.uniform() < 0.01
    };
    s.patient.set_flag("breathlessness", u8::from(breathless));
    Ok(())
}

fn eval_pvd(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::peripheral_vascular_disease(s.band, s.gender)?;
    let evidence = [
        s.diabetic()?,
        s.current_smoker()?,
        s.former_smoker()?,
        s.present("hypertension")?,
        s.present("mi")?,
        s.present("angina")?,
        s.present("heartFailure")?,
        s.present("stroke")?,
        s.present("tia")?,
    ];
    s.store_condition("pvd", &model, &evidence)
}

fn eval_chronic_pain(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::chronic_pain(s.band, s.gender)?;
    let evidence = [
        s.present("arthritis")?,
        s.present("osteoporosis")?,
        s.present("copd")?,
        s.present("migraine")?,
        s.present("mi")? || s.present("angina")?,
        s.present("pepticUlcer")?,
        s.diabetic()?,
    ];
    s.store_condition("chronicPain", &model, &evidence)
}

fn eval_frailty(s: &mut EvalScope<'_>) -> Result<()> {
    let model = functional::frailty(s.band, s.gender)?;
    let cardiovascular = s.present("mi")?
        || s.present("tia")?
        || s.present("stroke")?
        || s.present("angina")?;
    let evidence = [
        s.present("hearingLoss")?,
        s.diabetic()?,
        s.present("visualImpairment")?,
        s.patient.int("comorbidity_count")? >= 3,
        cardiovascular,
        s.present("copd")?,
    ];
    s.store_condition("frailty", &model, &evidence)
}

fn eval_badl_impairment(s: &mut EvalScope<'_>) -> Result<()> {
    let model = functional::badl_impairment(s.band, s.gender)?;
    let bmi = s.patient.float("bmi")?;
    let evidence = [
        s.diabetic()?,
        bmi >= 30.0 && bmi < 35.0,
        bmi >= 35.0 && bmi < 40.0,
        s.present("frailty")?,
    ];
    s.store_condition("badlImpairment", &model, &evidence)
}

fn eval_difficulty_bathing(s: &mut EvalScope<'_>) -> Result<()> {
    let p = if s.male() { 0.13 } else { 0.18 };
    let bathing = s.present("badlImpairment")? && s.rng.uniform() < p;
    s.patient.set_flag("difficultyBathing", u8::from(bathing));
    Ok(())
}

fn eval_depression(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::depression(s.band, s.gender)?;
    let evidence = [
        s.present("frailty")?,
        s.present("arthritis")?,
        s.present("badlImpairment")?,
        s.present("parkinsonsDisease")?,
        s.present("heartFailure")?,
    ];
    s.store_condition("depression", &model, &evidence)
}

fn eval_aud(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::alcohol_use_disorder(s.band, s.gender)?;
    let evidence = [s.present("depression")?];
    s.store_condition("aud", &model, &evidence)
}

fn eval_liver_disease(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::liver_disease(s.band, s.gender)?;
    let evidence = [s.male(), s.patient.float("bmi")? >= 30.0, s.present("aud")?];
    s.store_condition("liverDisease", &model, &evidence)
}

fn eval_sleep_disturbance(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::sleep_disturbance(s.band, s.gender)?;
    let heart_disease = s.present("heartFailure")? || s.present("mi")? || s.present("angina")?;
    let evidence = [
        s.present("depression")?,
        s.present("hypertension")?,
        heart_disease,
        s.diabetic()?,
        s.present("pepticUlcer")?,
        s.present("asthma")?,
        s.present("copd")?,
    ];
    s.store_condition("sleepDisturbance", &model, &evidence)
}

fn eval_iadl_impairment(s: &mut EvalScope<'_>) -> Result<()> {
    let model = functional::iadl_impairment(s.band, s.gender)?;
    let evidence = [
        s.present("frailty")?,
        s.diabetic()?,
        s.present("sleepDisturbance")?,
    ];
    s.store_condition("iadlImpairment", &model, &evidence)
}

fn eval_medication_assistance(s: &mut EvalScope<'_>) -> Result<()> {
    // Medication assistance prevalence spread over those with IADL impairment
    let assisted = s.present("iadlImpairment")? && s.rng.uniform() < 0.147;
    s.patient.set_flag("medicationAssistance", u8::from(assisted));
    Ok(())
}

fn eval_syncope(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::syncope(s.band, s.gender)?;
    let evidence = [
        s.present("stroke")?,
        s.present("tia")?,
        s.present("hypertension")?,
    ];
    s.store_condition("syncope", &model, &evidence)
}

fn eval_difficulty_walking(s: &mut EvalScope<'_>) -> Result<()> {
    let cardiovascular_count = u8::from(s.present("tia")? || s.present("stroke")?)
        + u8::from(s.present("mi")? || s.present("angina")?)
        + u8::from(s.present("af")?)
        + u8::from(s.present("heartFailure")?);
    let inputs = WalkingInputs {
        cardiovascular_count,
        respiratory: s.present("copd")? || s.present("asthma")?,
        cognitive: s.present("mci")? || s.present("dementia")?,
        musculoskeletal: s.present("parkinsonsDisease")?
            || s.present("ra")?
            || s.present("arthritis")?,
    };
    let walking = s.collaborators.functional.difficulty_walking(&inputs, s.rng);
    s.patient.set_flag("difficultyWalking", walking);
    Ok(())
}

fn eval_uses_walking_aid(s: &mut EvalScope<'_>) -> Result<()> {
    // Most of those with walking difficulty, and all who are frail, use an aid
    let aid = ((s.present("difficultyWalking")? && s.rng.uniform() < 0.87)
        || s.present("frailty")?)
        && !s.present("aerobicallyActive")?;
    s.patient.set_flag("usesWalkingAid", u8::from(aid));
    Ok(())
}

fn eval_difficulty_walking_outside(s: &mut EvalScope<'_>) -> Result<()> {
    // 48.4% of frail individuals cannot walk 100 yards, against 5.68% of
    // the non-frail
    let outside = ((s.present("frailty")? && s.rng.uniform() < 0.484)
        || s.rng.uniform() < 0.0568)
        && !s.present("aerobicallyActive")?;
    s.patient.set_flag("difficultyWalkingOutside", u8::from(outside));
    Ok(())
}

fn eval_falls(s: &mut EvalScope<'_>) -> Result<()> {
    let model = functional::falls(s.band, s.gender)?;
    let evidence = [
        s.present("difficultyWalking")?,
        s.present("dizziness")?,
        s.present("parkinsonsDisease")?,
        s.present("arthritis")?,
        s.present("urinaryIncontinence")?,
        s.present("orthostaticHypotension")?,
        s.present("af")?,
        s.present("depression")?,
        s.present("footProblems")?,
    ];
    s.store_condition("falls", &model, &evidence)
}

fn eval_fear_of_falling(s: &mut EvalScope<'_>) -> Result<()> {
    // Fear of falling is roughly twice as common in women after a fall
    let multiplier = if s.male() { 1.0 } else { 2.0 };
    let fearful = s.present("falls")? && s.rng.uniform() < 0.32 * multiplier;
    s.patient.set_flag("fearOfFalling", u8::from(fearful));
    Ok(())
}

fn eval_malnutrition(s: &mut EvalScope<'_>) -> Result<()> {
    let model = functional::malnutrition(s.band, s.gender)?;
    let evidence = [
        s.present("parkinsonsDisease")?,
        s.present("badlImpairment")?,
        s.present("mci")?,
        s.present("dementia")?,
    ];
    let eval = s.sample(&model, &evidence)?;
    let malnourished = eval.present == 1;
    s.patient.set_flag("malnutrition", eval.present);

    let weight_loss = s
        .rng
        .bernoulli(functional::weight_loss_given_malnutrition(malnourished));
    s.patient.set_flag("weightLoss", weight_loss);

    let anorexia = s
        .rng
        .bernoulli(functional::anorexia_given_malnutrition(malnourished));
    s.patient.set_flag("anorexia", anorexia);
    Ok(())
}

fn eval_fragility_fracture(s: &mut EvalScope<'_>) -> Result<()> {
    let model = comorbidity::fragility_fracture(s.band, s.gender)?;
    let bmi = s.patient.float("bmi")?;
    let evidence = [
        s.patient.float("weight")? < 58.0,
        bmi < 19.5,
        bmi > 30.0,
        s.present("weightLoss")?,
        s.current_smoker()?,
        s.present("ra")?,
    ];
    s.store_condition("fragilityFracture", &model, &evidence)
}

fn eval_social_vulnerability(s: &mut EvalScope<'_>) -> Result<()> {
    let p = s.band.prevalence_fraction("socialVulnerability", s.gender)?;
    let vulnerable = s.rng.bernoulli(p);
    s.patient.set_flag("socialVulnerability", vulnerable);
    Ok(())
}

fn eval_social_isolation(s: &mut EvalScope<'_>) -> Result<()> {
    let model = functional::social_isolation(s.band, s.gender)?;
    let evidence = [
        s.present("hearingLoss")?,
        s.present("falls")?,
        s.present("difficultyWalkingOutside")?,
        s.present("badlImpairment")?,
    ];
    s.store_condition("socialIsolation", &model, &evidence)
}

fn eval_homebound(s: &mut EvalScope<'_>) -> Result<()> {
    let model = functional::homebound(s.band, s.gender)?;
    let evidence = [
        s.present("depression")?,
        s.present("socialIsolation")?,
        s.present("usesWalkingAid")?,
        s.present("falls")?,
        s.present("fearOfFalling")?,
        s.present("chronicPain")?,
    ];
    s.store_condition("homebound", &model, &evidence)
}

fn eval_needs_care(s: &mut EvalScope<'_>) -> Result<()> {
    let needs = s.collaborators.functional.needs_care(
        s.patient.int("age")?,
        s.present("badlImpairment")?,
        s.present("iadlImpairment")?,
        s.present("livesAlone")?,
        s.rng,
    );
    s.patient.set_flag("needsCare", needs);
    Ok(())
}

fn eval_polypharmacy(s: &mut EvalScope<'_>) -> Result<()> {
    let flag = scores::has_polypharmacy(
        s.patient,
        &s.config.polypharmacy_conditions,
        s.config.polypharmacy_threshold,
    )?;
    s.patient.set_flag("polypharmacy", flag);
    Ok(())
}

fn eval_multimorbidity(s: &mut EvalScope<'_>) -> Result<()> {
    let flag = scores::has_multimorbidity(s.patient, &s.config.multimorbidity_conditions)?;
    s.patient.set_flag("multimorbidity", flag);
    Ok(())
}

fn eval_creatinine(s: &mut EvalScope<'_>) -> Result<()> {
    let draw = |s: &mut EvalScope<'_>| {
        s.collaborators
            .continuous
            .draw(ContinuousAttribute::Creatinine, s.band_index, s.gender, s.rng)
            .round()
    };

    let mut cr = draw(s);
    if s.present("ckd")? {
        // Stage 3-5 disease: push creatinine up until clearance drops below 34
        let height = s.patient.float("height")?;
        let weight = s.patient.float("weight")?;
        let age = s.patient.int("age")?;
        let mut crcl = scores::creatinine_clearance(height, weight, age, s.gender, cr);
        while crcl > 34.0 {
            crcl = scores::creatinine_clearance(height, weight, age, s.gender, cr);
            cr += 1.0;
        }
    }
    s.patient.set("cr", FieldValue::Float(cr));
    Ok(())
}

fn eval_self_reported_health(s: &mut EvalScope<'_>) -> Result<()> {
    let mut srh = s
        .collaborators
        .continuous
        .draw(
            ContinuousAttribute::SelfReportedHealth,
            s.band_index,
            s.gender,
            s.rng,
        )
        .round()
        .clamp(1.0, 5.0);

    // Active individuals under-report poor health
    if s.present("aerobicallyActive")? && srh < 3.0 && s.rng.uniform() > 0.7 {
        srh = s.rng.integer_between(3, 5) as f64;
    }

    // Known downgrades against functional losses
    if srh >= 3.0 {
        if s.present("stroke")? && s.rng.uniform() < 0.38 {
            srh = s.rng.integer_between(1, 3) as f64;
        }
        if srh >= 3.0 && s.present("iadlImpairment")? && s.rng.uniform() < 0.45 {
            srh = s.rng.integer_between(1, 3) as f64;
        }
        if srh >= 3.0 && s.present("badlImpairment")? && s.rng.uniform() < 0.5 {
            srh = s.rng.integer_between(1, 3) as f64;
        }
    }

    s.patient.set("self_reported_health", FieldValue::Float(srh));
    Ok(())
}

fn eval_efi(s: &mut EvalScope<'_>) -> Result<()> {
    let (efi, classification) = scores::electronic_frailty_index(s.patient)?;
    s.patient.set("efi", FieldValue::Float(efi));
    s.patient
        .set("efi_classification", FieldValue::Text(classification.to_string()));
    Ok(())
}

fn eval_tug(s: &mut EvalScope<'_>) -> Result<()> {
    let draw = |s: &mut EvalScope<'_>| {
        let v = s.collaborators.continuous.draw(
            ContinuousAttribute::TimedUpAndGo,
            s.band_index,
            s.gender,
            s.rng,
        );
        crate::risk::round_to(v, 2)
    };

    // Resample into the stratum matching the known diagnostic accuracy of
    // the ten-second cut-off.
    let mut tug = draw(s);
    let over_ten = if s.present("frailty")? {
        s.rng.uniform() < 0.93
    } else {
        !(s.rng.uniform() < 0.62)
    };
    if over_ten {
        while tug < 10.0 {
            tug = draw(s);
        }
    } else {
        while tug > 10.0 {
            tug = draw(s);
        }
    }
    s.patient.set("tug", FieldValue::Float(tug));
    Ok(())
}

fn eval_asa(s: &mut EvalScope<'_>) -> Result<()> {
    let asa = scores::asa_class(s.patient)?;
    s.patient.set("asa", FieldValue::Int(asa));
    Ok(())
}

fn eval_post_op_delirium(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::post_op_delirium();
    let evidence = [
        s.present("historyOfDelirium")?,
        s.present("frailty")?,
        s.present("ckd")?,
        s.present("mci")? || s.present("dementia")?,
        s.present("depression")?,
        s.present("badlImpairment")?,
        s.present("iadlImpairment")?,
        s.present("stroke")?,
        s.present("tia")?,
        s.current_smoker()?,
        s.present("visualImpairment")?,
    ];
    s.store_outcome("pod_risk", "pod_present", &model, &evidence)
}

fn eval_all_surgical_complications(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::all_surgical_complications();
    let evidence = [
        s.present("frailty")?,
        s.present("depression")?,
        s.present("polypharmacy")?,
        s.current_smoker()?,
        s.present("aud")?,
    ];
    s.store_outcome(
        "all_surgical_comps_risk",
        "all_surgical_comps_present",
        &model,
        &evidence,
    )
}

fn eval_post_op_pain(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::post_operative_pain();
    let evidence = [s.present("depression")?, s.current_smoker()?];
    s.store_outcome("post_op_pain_risk", "post_op_pain_present", &model, &evidence)
}

fn eval_wound_complications(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::wound_complications();
    let evidence = [s.current_smoker()?, s.present("frailty")?, s.present("aud")?];
    s.store_outcome(
        "wound_complications_risk",
        "wound_complications_present",
        &model,
        &evidence,
    )
}

fn eval_post_op_sepsis(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::post_op_sepsis();
    let evidence = [
        s.current_smoker()?,
        s.present("frailty")?,
        s.present("aud")?,
        s.present("heartFailure")?,
        s.diabetic()?,
        s.present("ckd")?,
    ];
    s.store_outcome("post_op_sepsis_risk", "post_op_sepsis_present", &model, &evidence)
}

fn eval_post_op_pulmonary(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::post_op_pulmonary_complications();
    let evidence = [
        s.current_smoker()?,
        s.present("frailty")?,
        s.present("aud")?,
        s.present("heartFailure")?,
    ];
    s.store_outcome(
        "post_op_pulmonary_comps_risk",
        "post_op_pulmonary_comps_present",
        &model,
        &evidence,
    )
}

fn eval_post_op_neuro(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::post_op_neuro_complications();
    let evidence = [s.current_smoker()?, s.present("frailty")?];
    s.store_outcome(
        "post_op_neuro_comps_risk",
        "post_op_neuro_comps_present",
        &model,
        &evidence,
    )
}

fn eval_cpr_failure(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::cpr_failure();
    let age = s.patient.int("age")?;
    let evidence = [
        age > 70 && age <= 75,
        age > 75 && age <= 80,
        age > 80,
        s.present("badlImpairment")?,
        s.present("ckd")?,
    ];
    s.store_outcome("cpr_failure_risk", "cpr_failure_present", &model, &evidence)
}

fn eval_itu_admission(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::itu_admission();
    let asa = s.patient.int("asa")?;
    let evidence = [
        s.current_smoker()?,
        s.present("aud")?,
        s.present("anaemia")?,
        s.present("frailty")?,
        asa == 3,
        asa == 4,
    ];
    s.store_outcome(
        "post_op_itu_admission_risk",
        "post_op_itu_admission_present",
        &model,
        &evidence,
    )
}

fn eval_pims(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::potentially_inappropriate_medications();
    let evidence = [s.diabetic()?, s.present("polypharmacy")?];
    s.store_outcome("pims_risk", "pims_present", &model, &evidence)
}

fn eval_increased_los(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::increased_length_of_stay();
    let asa = s.patient.int("asa")?;
    let disability = s.present("iadlImpairment")? || s.present("badlImpairment")?;
    let evidence = [
        s.present("frailty")?,
        s.present("aud")?,
        disability,
        asa == 3,
        asa == 4,
    ];
    s.store_outcome("increased_los_risk", "increased_los_present", &model, &evidence)
}

fn eval_functional_decline(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::functional_decline();
    let evidence = [s.present("iadlImpairment")?];
    s.store_outcome(
        "functional_decline_risk",
        "functional_decline_present",
        &model,
        &evidence,
    )
}

fn eval_neutropaenic_events(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::neutropaenic_events();
    let evidence = [s.present("comorbidity")?, s.diabetic()?];
    s.store_outcome(
        "neutropaenic_events_risk",
        "neutropaenic_events_present",
        &model,
        &evidence,
    )
}

fn eval_nursing_home_admission(s: &mut EvalScope<'_>) -> Result<()> {
    let model = outcomes::nursing_home_admission();
    let evidence = [
        s.current_smoker()?,
        s.present("frailty")?,
        s.present("badlImpairment")?,
        s.present("difficultyWalkingOutside")?,
    ];
    s.store_outcome(
        "nursing_home_admission_risk",
        "nursing_home_admission_present",
        &model,
        &evidence,
    )
}

fn eval_chemotherapy_toxicity(s: &mut EvalScope<'_>) -> Result<()> {
    let (risk, score, present) = scores::carg_toxicity(s.patient, s.gender)?;
    s.patient
        .set("chemotherapy_toxicity_risk", FieldValue::Float(risk));
    s.patient
        .set("chemotherapy_toxicity_score", FieldValue::Int(score));
    s.patient.set_flag("chemotherapy_toxicity_present", present);
    Ok(())
}

fn eval_post_op_mace(s: &mut EvalScope<'_>) -> Result<()> {
    let (risk, present) = scores::gupta_mace(s.patient)?;
    s.patient.set("post_op_mace_risk", FieldValue::Float(risk));
    s.patient.set_flag("post_op_mace_present", present);
    Ok(())
}

fn eval_sort_major(s: &mut EvalScope<'_>) -> Result<()> {
    let (risk, present) = scores::sort_mortality(s.patient, scores::SurgeryMagnitude::Major)?;
    s.patient
        .set("post_op_30_day_major_mortality_risk", FieldValue::Float(risk));
    s.patient
        .set_flag("post_op_30_day_major_mortality_present", present);
    Ok(())
}

fn eval_sort_minor(s: &mut EvalScope<'_>) -> Result<()> {
    let (risk, present) = scores::sort_mortality(s.patient, scores::SurgeryMagnitude::Minor)?;
    s.patient
        .set("post_op_30_day_minor_mortality_risk", FieldValue::Float(risk));
    s.patient
        .set_flag("post_op_30_day_minor_mortality_present", present);
    Ok(())
}

fn eval_ten_year_mortality(s: &mut EvalScope<'_>) -> Result<()> {
    let (risk, excess) = scores::ten_year_mortality(s.patient, s.gender)?;
    s.patient
        .set("10_year_mortality_risk", FieldValue::Float(risk));
    s.patient.set_flag("10_year_mortality_excess_present", excess);
    Ok(())
}

fn eval_composite_endpoints(s: &mut EvalScope<'_>) -> Result<()> {
    let groups: [(&'static str, &[String]); 4] = [
        ("composite_endpoint_surgery_adverse", &s.config.surgery_endpoints),
        ("composite_endpoint_chemo_adverse", &s.config.chemotherapy_endpoints),
        ("composite_endpoint_general_adverse", &s.config.general_endpoints),
        (
            "composite_endpoint_oncogeris_beneficial",
            &s.config.oncogeriatric_endpoints,
        ),
    ];

    let mut values = [0u8; 4];
    for (i, (_, fields)) in groups.iter().enumerate() {
        for field in fields.iter() {
            if s.patient.contains(field) && s.patient.is_present(field)? {
                values[i] = 1;
                break;
            }
        }
    }
    for ((field, _), value) in groups.iter().zip(values) {
        s.patient.set_flag(field, value);
    }
    Ok(())
}

/// Fields assigned by root sampling, before any graph node runs
pub const ROOT_FIELDS: [&str; 35] = [
    "id",
    "age",
    "gender",
    "cancer",
    "ethnicity",
    "deprivation",
    "mdt",
    "cancer_stage",
    "surgery",
    "chemotherapy",
    "radiotherapy",
    "aerobicallyActive",
    "asthma",
    "migraine",
    "pepticUlcer",
    "thyroidDisease",
    "luts",
    "ed",
    "schizophrenia",
    "bad",
    "sle",
    "ra",
    "hearingLoss",
    "visualImpairment",
    "urinaryIncontinence",
    "livesAlone",
    "drinksAlcohol",
    "mci",
    "comorbidity_count",
    "comorbidity",
    "t1dm",
    "t2dm",
    "height",
    "weight",
    "bmi",
];

/// Root fields written by the major root-node pass; diabetes itself is
/// stored as its two subtypes, which sit in `ROOT_FIELDS`
pub const MAJOR_ROOT_FIELDS: [&str; 7] = [
    "hypertension",
    "af",
    "heartValveDisease",
    "parkinsonsDisease",
    "dementia",
    "osteoporosis",
    "arthritis",
];

/// Remaining root fields assigned after the comorbidity roots
pub const LATE_ROOT_FIELDS: [&str; 2] = ["incorrectDateReported", "smoking"];

/// Every node of the causal graph in reference declaration order
#[must_use]
pub fn all_nodes() -> Vec<&'static CausalNode> {
    NODES.iter().chain(OUTCOME_NODES.iter()).collect()
}

/// The derived-attribute catalogue in reference declaration order
pub static NODES: [CausalNode; 45] = [
    CausalNode {
        name: "foot problems",
        provides: &["footProblems"],
        parents: &["gender"],
        eval: eval_foot_problems,
    },
    CausalNode {
        name: "history of delirium",
        provides: &["historyOfDelirium"],
        parents: &["dementia", "visualImpairment"],
        eval: eval_history_of_delirium,
    },
    CausalNode {
        name: "copd",
        provides: &["copd"],
        parents: &["smoking", "asthma"],
        eval: eval_copd,
    },
    CausalNode {
        name: "chronic kidney disease",
        provides: &["ckd"],
        parents: &["hypertension", "bmi", "t1dm", "t2dm"],
        eval: eval_ckd,
    },
    CausalNode {
        name: "anaemia",
        provides: &["anaemia"],
        parents: &["ckd"],
        eval: eval_anaemia,
    },
    CausalNode {
        name: "antipsychotics",
        provides: &["antipsychotics"],
        parents: &["dementia", "schizophrenia"],
        eval: eval_antipsychotics,
    },
    CausalNode {
        name: "antihypertensives",
        provides: &["antihypertensives"],
        parents: &["hypertension"],
        eval: eval_antihypertensives,
    },
    CausalNode {
        name: "corticosteroids",
        provides: &["corticosteroids"],
        parents: &["copd", "ra"],
        eval: eval_corticosteroids,
    },
    CausalNode {
        name: "cardiovascular events",
        provides: &["tia", "stroke", "mi", "angina"],
        parents: &[
            "age",
            "af",
            "antipsychotics",
            "migraine",
            "ra",
            "ckd",
            "schizophrenia",
            "bad",
            "sle",
            "antihypertensives",
            "t1dm",
            "t2dm",
            "bmi",
            "smoking",
            "corticosteroids",
        ],
        eval: eval_cardiovascular,
    },
    CausalNode {
        name: "hemiplegia",
        provides: &["hemiplegia"],
        parents: &["stroke"],
        eval: eval_hemiplegia,
    },
    CausalNode {
        name: "dizziness",
        provides: &["dizziness"],
        parents: &["gender", "osteoporosis"],
        eval: eval_dizziness,
    },
    CausalNode {
        name: "pressure ulcers",
        provides: &["ulcers"],
        parents: &["urinaryIncontinence"],
        eval: eval_ulcers,
    },
    CausalNode {
        name: "orthostatic hypotension",
        provides: &["orthostaticHypotension"],
        parents: &["t1dm", "t2dm", "hypertension", "parkinsonsDisease", "dementia"],
        eval: eval_orthostatic_hypotension,
    },
    CausalNode {
        name: "faecal incontinence",
        provides: &["faecalIncontinence"],
        parents: &["urinaryIncontinence", "t1dm", "t2dm", "hypertension"],
        eval: eval_faecal_incontinence,
    },
    CausalNode {
        name: "heart failure",
        provides: &["heartFailure"],
        parents: &["gender", "bmi", "hypertension", "t1dm", "t2dm", "smoking", "mi", "af"],
        eval: eval_heart_failure,
    },
    CausalNode {
        name: "breathlessness",
        provides: &["breathlessness"],
        parents: &["copd", "heartFailure"],
        eval: eval_breathlessness,
    },
    CausalNode {
        name: "peripheral vascular disease",
        provides: &["pvd"],
        parents: &[
            "t1dm",
            "t2dm",
            "smoking",
            "hypertension",
            "mi",
            "angina",
            "heartFailure",
            "stroke",
            "tia",
        ],
        eval: eval_pvd,
    },
    CausalNode {
        name: "chronic pain",
        provides: &["chronicPain"],
        parents: &[
            "arthritis",
            "osteoporosis",
            "copd",
            "migraine",
            "mi",
            "angina",
            "pepticUlcer",
            "t1dm",
            "t2dm",
        ],
        eval: eval_chronic_pain,
    },
    CausalNode {
        name: "frailty",
        provides: &["frailty"],
        parents: &[
            "hearingLoss",
            "t1dm",
            "t2dm",
            "visualImpairment",
            "comorbidity_count",
            "mi",
            "tia",
            "stroke",
            "angina",
            "copd",
        ],
        eval: eval_frailty,
    },
    CausalNode {
        name: "badl impairment",
        provides: &["badlImpairment"],
        parents: &["t1dm", "t2dm", "bmi", "frailty"],
        eval: eval_badl_impairment,
    },
    CausalNode {
        name: "difficulty bathing",
        provides: &["difficultyBathing"],
        parents: &["gender", "badlImpairment"],
        eval: eval_difficulty_bathing,
    },
    CausalNode {
        name: "depression",
        provides: &["depression"],
        parents: &["frailty", "arthritis", "badlImpairment", "parkinsonsDisease", "heartFailure"],
        eval: eval_depression,
    },
    CausalNode {
        name: "alcohol use disorder",
        provides: &["aud"],
        parents: &["depression"],
        eval: eval_aud,
    },
    CausalNode {
        name: "liver disease",
        provides: &["liverDisease"],
        parents: &["gender", "bmi", "aud"],
        eval: eval_liver_disease,
    },
    CausalNode {
        name: "sleep disturbance",
        provides: &["sleepDisturbance"],
        parents: &[
            "depression",
            "hypertension",
            "heartFailure",
            "mi",
            "angina",
            "t1dm",
            "t2dm",
            "pepticUlcer",
            "asthma",
            "copd",
        ],
        eval: eval_sleep_disturbance,
    },
    CausalNode {
        name: "iadl impairment",
        provides: &["iadlImpairment"],
        parents: &["frailty", "t1dm", "t2dm", "sleepDisturbance"],
        eval: eval_iadl_impairment,
    },
    CausalNode {
        name: "medication assistance",
        provides: &["medicationAssistance"],
        parents: &["iadlImpairment"],
        eval: eval_medication_assistance,
    },
    CausalNode {
        name: "syncope",
        provides: &["syncope"],
        parents: &["stroke", "tia", "hypertension"],
        eval: eval_syncope,
    },
    CausalNode {
        name: "difficulty walking",
        provides: &["difficultyWalking"],
        parents: &[
            "tia",
            "stroke",
            "mi",
            "angina",
            "af",
            "heartFailure",
            "copd",
            "asthma",
            "mci",
            "dementia",
            "parkinsonsDisease",
            "ra",
            "arthritis",
        ],
        eval: eval_difficulty_walking,
    },
    CausalNode {
        name: "uses walking aid",
        provides: &["usesWalkingAid"],
        parents: &["difficultyWalking", "frailty", "aerobicallyActive"],
        eval: eval_uses_walking_aid,
    },
    CausalNode {
        name: "difficulty walking outside",
        provides: &["difficultyWalkingOutside"],
        parents: &["frailty", "aerobicallyActive"],
        eval: eval_difficulty_walking_outside,
    },
    CausalNode {
        name: "falls",
        provides: &["falls"],
        parents: &[
            "difficultyWalking",
            "dizziness",
            "parkinsonsDisease",
            "arthritis",
            "urinaryIncontinence",
            "orthostaticHypotension",
            "af",
            "depression",
            "footProblems",
        ],
        eval: eval_falls,
    },
    CausalNode {
        name: "fear of falling",
        provides: &["fearOfFalling"],
        parents: &["gender", "falls"],
        eval: eval_fear_of_falling,
    },
    CausalNode {
        name: "malnutrition",
        provides: &["malnutrition", "weightLoss", "anorexia"],
        parents: &["parkinsonsDisease", "badlImpairment", "mci", "dementia"],
        eval: eval_malnutrition,
    },
    CausalNode {
        name: "fragility fracture",
        provides: &["fragilityFracture"],
        parents: &["weight", "bmi", "weightLoss", "smoking", "ra"],
        eval: eval_fragility_fracture,
    },
    CausalNode {
        name: "social vulnerability",
        provides: &["socialVulnerability"],
        parents: &[],
        eval: eval_social_vulnerability,
    },
    CausalNode {
        name: "social isolation",
        provides: &["socialIsolation"],
        parents: &["hearingLoss", "falls", "difficultyWalkingOutside", "badlImpairment"],
        eval: eval_social_isolation,
    },
    CausalNode {
        name: "homebound",
        provides: &["homebound"],
        parents: &[
            "depression",
            "socialIsolation",
            "usesWalkingAid",
            "falls",
            "fearOfFalling",
            "chronicPain",
        ],
        eval: eval_homebound,
    },
    CausalNode {
        name: "needs care",
        provides: &["needsCare"],
        parents: &["age", "badlImpairment", "iadlImpairment", "livesAlone"],
        eval: eval_needs_care,
    },
    CausalNode {
        name: "polypharmacy",
        provides: &["polypharmacy"],
        parents: &[
            "antihypertensives",
            "antipsychotics",
            "corticosteroids",
            "t1dm",
            "t2dm",
            "copd",
            "asthma",
            "heartFailure",
            "depression",
            "chronicPain",
            "af",
            "ckd",
        ],
        eval: eval_polypharmacy,
    },
    CausalNode {
        name: "multimorbidity",
        provides: &["multimorbidity"],
        parents: &[
            "t1dm",
            "t2dm",
            "hypertension",
            "af",
            "heartValveDisease",
            "parkinsonsDisease",
            "dementia",
            "osteoporosis",
            "arthritis",
            "copd",
            "ckd",
            "heartFailure",
            "liverDisease",
            "pvd",
            "stroke",
            "mi",
            "angina",
            "depression",
        ],
        eval: eval_multimorbidity,
    },
    CausalNode {
        name: "creatinine",
        provides: &["cr"],
        parents: &["ckd", "height", "weight", "age"],
        eval: eval_creatinine,
    },
    CausalNode {
        name: "self-reported health",
        provides: &["self_reported_health"],
        parents: &["aerobicallyActive", "stroke", "iadlImpairment", "badlImpairment"],
        eval: eval_self_reported_health,
    },
    CausalNode {
        name: "timed up and go",
        provides: &["tug"],
        parents: &["frailty"],
        eval: eval_tug,
    },
    CausalNode {
        name: "asa class",
        provides: &["asa"],
        parents: &[
            "bmi",
            "smoking",
            "drinksAlcohol",
            "t1dm",
            "t2dm",
            "copd",
            "asthma",
            "aud",
            "tia",
            "stroke",
            "heartFailure",
            "mi",
            "angina",
            "badlImpairment",
            "iadlImpairment",
            "needsCare",
            "difficultyWalkingOutside",
        ],
        eval: eval_asa,
    },
];

/// Terminal outcome nodes, evaluated after the condition cascade
pub static OUTCOME_NODES: [CausalNode; 20] = [
    CausalNode {
        name: "post-op delirium",
        provides: &["pod_risk", "pod_present"],
        parents: &[
            "historyOfDelirium",
            "frailty",
            "ckd",
            "mci",
            "dementia",
            "depression",
            "badlImpairment",
            "iadlImpairment",
            "stroke",
            "tia",
            "smoking",
            "visualImpairment",
        ],
        eval: eval_post_op_delirium,
    },
    CausalNode {
        name: "any surgical complication",
        provides: &["all_surgical_comps_risk", "all_surgical_comps_present"],
        parents: &["frailty", "depression", "polypharmacy", "smoking", "aud"],
        eval: eval_all_surgical_complications,
    },
    CausalNode {
        name: "post-op pain",
        provides: &["post_op_pain_risk", "post_op_pain_present"],
        parents: &["depression", "smoking"],
        eval: eval_post_op_pain,
    },
    CausalNode {
        name: "wound complications",
        provides: &["wound_complications_risk", "wound_complications_present"],
        parents: &["smoking", "frailty", "aud"],
        eval: eval_wound_complications,
    },
    CausalNode {
        name: "post-op sepsis",
        provides: &["post_op_sepsis_risk", "post_op_sepsis_present"],
        parents: &["smoking", "frailty", "aud", "heartFailure", "t1dm", "t2dm", "ckd"],
        eval: eval_post_op_sepsis,
    },
    CausalNode {
        name: "post-op pulmonary complications",
        provides: &["post_op_pulmonary_comps_risk", "post_op_pulmonary_comps_present"],
        parents: &["smoking", "frailty", "aud", "heartFailure"],
        eval: eval_post_op_pulmonary,
    },
    CausalNode {
        name: "post-op neurological complications",
        provides: &["post_op_neuro_comps_risk", "post_op_neuro_comps_present"],
        parents: &["smoking", "frailty"],
        eval: eval_post_op_neuro,
    },
    CausalNode {
        name: "cpr failure",
        provides: &["cpr_failure_risk", "cpr_failure_present"],
        parents: &["age", "badlImpairment", "ckd"],
        eval: eval_cpr_failure,
    },
    CausalNode {
        name: "itu admission",
        provides: &["post_op_itu_admission_risk", "post_op_itu_admission_present"],
        parents: &["smoking", "aud", "anaemia", "frailty", "asa"],
        eval: eval_itu_admission,
    },
    CausalNode {
        name: "potentially inappropriate medications",
        provides: &["pims_risk", "pims_present"],
        parents: &["t1dm", "t2dm", "polypharmacy"],
        eval: eval_pims,
    },
    CausalNode {
        name: "prolonged stay",
        provides: &["increased_los_risk", "increased_los_present"],
        parents: &["frailty", "aud", "iadlImpairment", "badlImpairment", "asa"],
        eval: eval_increased_los,
    },
    CausalNode {
        name: "functional decline",
        provides: &["functional_decline_risk", "functional_decline_present"],
        parents: &["iadlImpairment"],
        eval: eval_functional_decline,
    },
    CausalNode {
        name: "neutropaenic events",
        provides: &["neutropaenic_events_risk", "neutropaenic_events_present"],
        parents: &["comorbidity", "t1dm", "t2dm"],
        eval: eval_neutropaenic_events,
    },
    CausalNode {
        name: "nursing home admission",
        provides: &["nursing_home_admission_risk", "nursing_home_admission_present"],
        parents: &["smoking", "frailty", "badlImpairment", "difficultyWalkingOutside"],
        eval: eval_nursing_home_admission,
    },
    CausalNode {
        name: "chemotherapy toxicity",
        provides: &[
            "chemotherapy_toxicity_risk",
            "chemotherapy_toxicity_score",
            "chemotherapy_toxicity_present",
        ],
        parents: &[
            "age",
            "cancer",
            "height",
            "weight",
            "anaemia",
            "cr",
            "hearingLoss",
            "falls",
            "medicationAssistance",
            "difficultyWalkingOutside",
            "socialIsolation",
        ],
        eval: eval_chemotherapy_toxicity,
    },
    CausalNode {
        name: "post-op mace",
        provides: &["post_op_mace_risk", "post_op_mace_present"],
        parents: &["age", "iadlImpairment", "badlImpairment", "needsCare", "asa", "cr", "mdt"],
        eval: eval_post_op_mace,
    },
    CausalNode {
        name: "30-day mortality, major surgery",
        provides: &[
            "post_op_30_day_major_mortality_risk",
            "post_op_30_day_major_mortality_present",
        ],
        parents: &["age", "asa", "cancer"],
        eval: eval_sort_major,
    },
    CausalNode {
        name: "30-day mortality, minor surgery",
        provides: &[
            "post_op_30_day_minor_mortality_risk",
            "post_op_30_day_minor_mortality_present",
        ],
        parents: &["age", "asa", "cancer"],
        eval: eval_sort_minor,
    },
    CausalNode {
        name: "10-year mortality",
        provides: &["10_year_mortality_risk", "10_year_mortality_excess_present"],
        parents: &[
            "age",
            "t1dm",
            "t2dm",
            "angina",
            "mi",
            "af",
            "heartFailure",
            "heartValveDisease",
            "copd",
            "asthma",
            "smoking",
            "drinksAlcohol",
            "bmi",
            "aerobicallyActive",
            "difficultyBathing",
            "difficultyWalkingOutside",
            "incorrectDateReported",
            "self_reported_health",
        ],
        eval: eval_ten_year_mortality,
    },
    CausalNode {
        name: "composite endpoints",
        provides: &[
            "composite_endpoint_surgery_adverse",
            "composite_endpoint_chemo_adverse",
            "composite_endpoint_general_adverse",
            "composite_endpoint_oncogeris_beneficial",
        ],
        parents: &[
            "pod_present",
            "all_surgical_comps_present",
            "post_op_pain_present",
            "wound_complications_present",
            "post_op_sepsis_present",
            "post_op_pulmonary_comps_present",
            "post_op_neuro_comps_present",
            "post_op_itu_admission_present",
            "increased_los_present",
            "post_op_mace_present",
            "post_op_30_day_major_mortality_present",
            "post_op_30_day_minor_mortality_present",
            "neutropaenic_events_present",
            "chemotherapy_toxicity_present",
            "functional_decline_present",
            "nursing_home_admission_present",
            "cpr_failure_present",
            "10_year_mortality_excess_present",
            "pims_present",
            "polypharmacy",
            "falls",
            "malnutrition",
            "frailty",
            "depression",
        ],
        eval: eval_composite_endpoints,
    },
];
